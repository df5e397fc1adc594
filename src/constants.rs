//! DWARF constant definitions.
//!
//! Each family of DWARF constants is a tuple newtype over its encoded width:
//! `DW_TAG_*` values are [`DwTag`], `DW_AT_*` are [`DwAt`], `DW_FORM_*` are
//! [`DwForm`], and the children flag byte is [`DwChildren`]. Unknown values
//! round-trip untouched: decoding never rejects a tag, attribute or form this
//! module has no name for, and `Display` falls back to the raw number.
//!
//! The set of named constants is the working subset typical compilation units
//! touch, not the standard's full roster; the newtypes accept any value either
//! way.

#![allow(non_upper_case_globals)]
#![allow(missing_docs)]

use std::fmt;

// Defines a constant family: a tuple newtype, one named const per value, and a
// Display impl that falls back to the raw number for unnamed values.
macro_rules! dw {
    ($struct_name:ident($struct_type:ty) { $($name:ident = $val:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $struct_name(pub $struct_type);

        $(
            pub const $name: $struct_name = $struct_name($val);
        )+

        impl fmt::Display for $struct_name {
            fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
                match *self {
                    $(
                        $name => write!(f, stringify!($name)),
                    )+
                    otherwise => write!(f, "Unknown {}: 0x{:x}",
                                        stringify!($struct_name),
                                        otherwise.0),
                }
            }
        }
    };
}

dw!(DwChildren(u8) {
    DW_CHILDREN_no = 0x00,
    DW_CHILDREN_yes = 0x01,
});

dw!(DwTag(u64) {
    DW_TAG_null = 0x00,
    DW_TAG_array_type = 0x01,
    DW_TAG_class_type = 0x02,
    DW_TAG_enumeration_type = 0x04,
    DW_TAG_formal_parameter = 0x05,
    DW_TAG_lexical_block = 0x0b,
    DW_TAG_member = 0x0d,
    DW_TAG_pointer_type = 0x0f,
    DW_TAG_reference_type = 0x10,
    DW_TAG_compile_unit = 0x11,
    DW_TAG_structure_type = 0x13,
    DW_TAG_subroutine_type = 0x15,
    DW_TAG_typedef = 0x16,
    DW_TAG_union_type = 0x17,
    DW_TAG_inheritance = 0x1c,
    DW_TAG_subrange_type = 0x21,
    DW_TAG_base_type = 0x24,
    DW_TAG_const_type = 0x26,
    DW_TAG_enumerator = 0x28,
    DW_TAG_subprogram = 0x2e,
    DW_TAG_variable = 0x34,
    DW_TAG_volatile_type = 0x35,
    DW_TAG_restrict_type = 0x37,
    DW_TAG_namespace = 0x39,
    DW_TAG_unspecified_type = 0x3b,
    DW_TAG_rvalue_reference_type = 0x42,
    DW_TAG_call_site = 0x48,
    DW_TAG_call_site_parameter = 0x49,
});

dw!(DwAt(u64) {
    DW_AT_sibling = 0x01,
    DW_AT_location = 0x02,
    DW_AT_name = 0x03,
    DW_AT_byte_size = 0x0b,
    DW_AT_stmt_list = 0x10,
    DW_AT_low_pc = 0x11,
    DW_AT_high_pc = 0x12,
    DW_AT_language = 0x13,
    DW_AT_comp_dir = 0x1b,
    DW_AT_const_value = 0x1c,
    DW_AT_inline = 0x20,
    DW_AT_producer = 0x25,
    DW_AT_prototyped = 0x27,
    DW_AT_abstract_origin = 0x31,
    DW_AT_artificial = 0x34,
    DW_AT_data_member_location = 0x38,
    DW_AT_decl_file = 0x3a,
    DW_AT_decl_line = 0x3b,
    DW_AT_declaration = 0x3c,
    DW_AT_encoding = 0x3e,
    DW_AT_external = 0x3f,
    DW_AT_frame_base = 0x40,
    DW_AT_specification = 0x47,
    DW_AT_type = 0x49,
    DW_AT_ranges = 0x55,
    DW_AT_call_all_calls = 0x7a,
    DW_AT_str_offsets_base = 0x72,
    DW_AT_addr_base = 0x73,
    DW_AT_rnglists_base = 0x74,
    DW_AT_loclists_base = 0x8c,
});

dw!(DwForm(u64) {
    DW_FORM_addr = 0x01,
    DW_FORM_block2 = 0x03,
    DW_FORM_block4 = 0x04,
    DW_FORM_data2 = 0x05,
    DW_FORM_data4 = 0x06,
    DW_FORM_data8 = 0x07,
    DW_FORM_string = 0x08,
    DW_FORM_block = 0x09,
    DW_FORM_block1 = 0x0a,
    DW_FORM_data1 = 0x0b,
    DW_FORM_flag = 0x0c,
    DW_FORM_sdata = 0x0d,
    DW_FORM_strp = 0x0e,
    DW_FORM_udata = 0x0f,
    DW_FORM_ref_addr = 0x10,
    DW_FORM_ref1 = 0x11,
    DW_FORM_ref2 = 0x12,
    DW_FORM_ref4 = 0x13,
    DW_FORM_ref8 = 0x14,
    DW_FORM_ref_udata = 0x15,
    DW_FORM_indirect = 0x16,
    DW_FORM_sec_offset = 0x17,
    DW_FORM_exprloc = 0x18,
    DW_FORM_flag_present = 0x19,
    DW_FORM_strx = 0x1a,
    DW_FORM_addrx = 0x1b,
    DW_FORM_line_strp = 0x1f,
    DW_FORM_ref_sig8 = 0x20,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_known_and_unknown() {
        assert_eq!(DW_TAG_compile_unit.to_string(), "DW_TAG_compile_unit");
        assert_eq!(DW_AT_name.to_string(), "DW_AT_name");
        assert_eq!(DW_FORM_strp.to_string(), "DW_FORM_strp");
        assert_eq!(DW_CHILDREN_yes.to_string(), "DW_CHILDREN_yes");

        assert_eq!(DwTag(0x4242).to_string(), "Unknown DwTag: 0x4242");
        assert_eq!(DwChildren(7).to_string(), "Unknown DwChildren: 0x7");
    }

    #[test]
    fn unknown_values_round_trip() {
        let vendor_tag = DwTag(0x4109); // vendor extension range
        assert_eq!(vendor_tag.0, 0x4109);
        assert_ne!(vendor_tag, DW_TAG_compile_unit);
    }
}
