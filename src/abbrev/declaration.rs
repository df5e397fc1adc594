//! Decoded abbreviation declarations.
//!
//! A declaration is the record one abbreviation-table entry decodes to: the
//! entry kind (tag), the children flag, and the ordered attribute
//! specifications every DIE referencing this declaration follows. Declarations
//! are immutable once decoded; the table shares them out as [`std::sync::Arc`]
//! handles.

use std::{collections::HashMap, sync::OnceLock};

use crate::{
    constants::{DwAt, DwChildren, DwForm, DwTag, DW_CHILDREN_yes},
    stream::{Parser, Record},
    Error, Result,
};

/// The description of one attribute in an abbreviated entry: a (name, form)
/// pair. The form says how the attribute's value is physically encoded in the
/// DIE stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// The attribute name, e.g. `DW_AT_name`
    pub name: DwAt,
    /// The value encoding, e.g. `DW_FORM_strp`
    pub form: DwForm,
}

/// The decoded body of a declaration: everything after the code.
///
/// Wire layout: `tag:uleb128 children:u8 (name:uleb128 form:uleb128)* (0,0)`.
#[derive(Debug, Clone)]
pub(crate) struct AbbrevDeclBody {
    pub tag: DwTag,
    pub children_flag: DwChildren,
    pub attr_specs: Vec<AttributeSpec>,
}

impl Record for AbbrevDeclBody {
    fn read(parser: &mut Parser<'_>) -> Result<Self> {
        let tag = DwTag(parser.read_uleb128()?);
        let children_flag = DwChildren(parser.read_le::<u8>()?);

        let mut attr_specs = Vec::new();
        loop {
            let name = parser.read_uleb128()?;
            let form = parser.read_uleb128()?;
            // The spec list ends on a (0, 0) pair; a zero name with a non-zero
            // form is still a spec and is kept as-is.
            if name == 0 && form == 0 {
                break;
            }
            attr_specs.push(AttributeSpec {
                name: DwAt(name),
                form: DwForm(form),
            });
        }

        Ok(AbbrevDeclBody {
            tag,
            children_flag,
            attr_specs,
        })
    }
}

/// A value returned by the key-based field accessor [`AbbrevDecl::field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// An unsigned integer field (`"code"`)
    Uint(u64),
    /// The entry kind (`"tag"`)
    Tag(DwTag),
    /// The raw children flag byte (`"children_flag"`)
    Children(DwChildren),
    /// The ordered attribute specifications (`"attr_spec"`)
    AttrSpecs(&'a [AttributeSpec]),
}

/// One decoded abbreviation declaration.
///
/// Wraps a decoded table entry and exposes its fields through typed accessors,
/// plus a narrow key-based [`field`](AbbrevDecl::field) accessor for tooling
/// that does not know field names ahead of time. A declaration is immutable
/// after decoding; its only interior state is a lazily built lookup map that
/// caches the first derivation for the object's lifetime.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::{AbbrevTable, Memory};
/// use dwarfscope::constants::*;
///
/// let section = Memory::new(vec![
///     0x02, 0x2e, 0x00, 0x03, 0x08, 0x49, 0x13, 0x00, 0x00,
///     0x00,
/// ]);
/// let mut table = AbbrevTable::new(&section, 0);
///
/// let decl = table.get_abbrev(2)?;
/// assert_eq!(decl.tag(), DW_TAG_subprogram);
/// assert!(!decl.has_children());
/// assert_eq!(decl.form_of(DW_AT_name), Some(DW_FORM_string));
/// assert_eq!(decl.form_of(DW_AT_low_pc), None);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
#[derive(Debug)]
pub struct AbbrevDecl {
    code: u64,
    body: AbbrevDeclBody,
    /// Lazily derived name -> form map, computed once on first use.
    forms_by_name: OnceLock<HashMap<DwAt, DwForm>>,
}

impl AbbrevDecl {
    pub(crate) fn new(code: u64, body: AbbrevDeclBody) -> AbbrevDecl {
        debug_assert!(code != 0, "code 0 is the table terminator");
        AbbrevDecl {
            code,
            body,
            forms_by_name: OnceLock::new(),
        }
    }

    /// The code DIEs use to reference this declaration. Never zero.
    #[must_use]
    pub fn code(&self) -> u64 {
        self.code
    }

    /// The entry kind.
    #[must_use]
    pub fn tag(&self) -> DwTag {
        self.body.tag
    }

    /// The raw children flag byte as decoded.
    #[must_use]
    pub fn children_flag(&self) -> DwChildren {
        self.body.children_flag
    }

    /// Does the entry have children in the DIE tree?
    ///
    /// True exactly when the decoded flag equals `DW_CHILDREN_yes`; any other
    /// byte value reads as "no children".
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.body.children_flag == DW_CHILDREN_yes
    }

    /// The ordered attribute specifications.
    ///
    /// The order is semantically significant: it is the order attribute values
    /// appear for every DIE using this declaration.
    #[must_use]
    pub fn attr_specs(&self) -> &[AttributeSpec] {
        &self.body.attr_specs
    }

    /// Iterate over the attribute specifications as `(name, form)` pairs.
    ///
    /// The iterator is slice-backed and restartable: every call yields a fresh
    /// pass over the stored specs, not a one-shot cursor.
    pub fn iter_attr_specs(&self) -> impl Iterator<Item = (DwAt, DwForm)> + '_ {
        self.body.attr_specs.iter().map(|spec| (spec.name, spec.form))
    }

    /// Look up the form of an attribute by name.
    ///
    /// Served from a derived name -> form map built lazily on first call and
    /// cached for the declaration's lifetime. When a name appears more than
    /// once (malformed but decodable input), the first spec in stream order
    /// wins.
    #[must_use]
    pub fn form_of(&self, name: DwAt) -> Option<DwForm> {
        let map = self.forms_by_name.get_or_init(|| {
            let mut map = HashMap::with_capacity(self.body.attr_specs.len());
            for spec in &self.body.attr_specs {
                map.entry(spec.name).or_insert(spec.form);
            }
            map
        });
        map.get(&name).copied()
    }

    /// Access a field of the decoded record by name.
    ///
    /// Known keys are `"code"`, `"tag"`, `"children_flag"` and `"attr_spec"`.
    /// This is the narrow dynamic path for generic tooling; the typed accessors
    /// are preferred everywhere field names are known at compile time.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoSuchField`] for any other key.
    pub fn field(&self, key: &str) -> Result<FieldValue<'_>> {
        match key {
            "code" => Ok(FieldValue::Uint(self.code)),
            "tag" => Ok(FieldValue::Tag(self.body.tag)),
            "children_flag" => Ok(FieldValue::Children(self.body.children_flag)),
            "attr_spec" => Ok(FieldValue::AttrSpecs(&self.body.attr_specs)),
            unknown => Err(Error::NoSuchField(unknown.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::stream::parse_record_at;

    fn decode_body(data: &[u8]) -> AbbrevDeclBody {
        let mut parser = Parser::new(data);
        parse_record_at(&mut parser, None).unwrap()
    }

    #[test]
    fn decodes_body_fields() {
        // DW_TAG_variable, no children, (DW_AT_name, DW_FORM_strp),
        // (DW_AT_type, DW_FORM_ref4), end
        let body = decode_body(&[0x34, 0x00, 0x03, 0x0E, 0x49, 0x13, 0x00, 0x00]);

        assert_eq!(body.tag, DW_TAG_variable);
        assert_eq!(body.children_flag, DW_CHILDREN_no);
        assert_eq!(
            body.attr_specs,
            vec![
                AttributeSpec {
                    name: DW_AT_name,
                    form: DW_FORM_strp
                },
                AttributeSpec {
                    name: DW_AT_type,
                    form: DW_FORM_ref4
                },
            ]
        );
    }

    #[test]
    fn empty_spec_list() {
        let body = decode_body(&[0x11, 0x01, 0x00, 0x00]);
        assert_eq!(body.tag, DW_TAG_compile_unit);
        assert_eq!(body.children_flag, DW_CHILDREN_yes);
        assert!(body.attr_specs.is_empty());
    }

    #[test]
    fn truncated_spec_list_fails() {
        let mut parser = Parser::new(&[0x34, 0x00, 0x03]);
        let result: Result<AbbrevDeclBody> = parse_record_at(&mut parser, None);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn has_children_compares_against_yes() {
        let with = AbbrevDecl::new(1, decode_body(&[0x11, 0x01, 0x00, 0x00]));
        assert!(with.has_children());

        let without = AbbrevDecl::new(2, decode_body(&[0x11, 0x00, 0x00, 0x00]));
        assert!(!without.has_children());

        // Any non-yes byte value means no children
        let odd = AbbrevDecl::new(3, decode_body(&[0x11, 0x07, 0x00, 0x00]));
        assert!(!odd.has_children());
        assert_eq!(odd.children_flag(), DwChildren(7));
    }

    #[test]
    fn iter_attr_specs_is_restartable() {
        let decl = AbbrevDecl::new(
            1,
            decode_body(&[0x2e, 0x01, 0x03, 0x08, 0x11, 0x01, 0x00, 0x00]),
        );

        let first: Vec<_> = decl.iter_attr_specs().collect();
        let second: Vec<_> = decl.iter_attr_specs().collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![(DW_AT_name, DW_FORM_string), (DW_AT_low_pc, DW_FORM_addr)]
        );
    }

    #[test]
    fn field_access_by_name() {
        let decl = AbbrevDecl::new(5, decode_body(&[0x34, 0x00, 0x03, 0x0E, 0x00, 0x00]));

        assert_eq!(decl.field("code").unwrap(), FieldValue::Uint(5));
        assert_eq!(decl.field("tag").unwrap(), FieldValue::Tag(DW_TAG_variable));
        assert_eq!(
            decl.field("children_flag").unwrap(),
            FieldValue::Children(DW_CHILDREN_no)
        );
        match decl.field("attr_spec").unwrap() {
            FieldValue::AttrSpecs(specs) => assert_eq!(specs.len(), 1),
            other => panic!("expected AttrSpecs, got {other:?}"),
        }

        match decl.field("sibling") {
            Err(Error::NoSuchField(key)) => assert_eq!(key, "sibling"),
            other => panic!("expected NoSuchField, got {other:?}"),
        }
    }

    #[test]
    fn form_lookup_is_stable_and_first_wins() {
        // DW_AT_name appears twice with different forms
        let decl = AbbrevDecl::new(
            1,
            decode_body(&[0x34, 0x00, 0x03, 0x0E, 0x03, 0x08, 0x00, 0x00]),
        );

        assert_eq!(decl.form_of(DW_AT_name), Some(DW_FORM_strp));
        // Second call hits the memoized map and agrees
        assert_eq!(decl.form_of(DW_AT_name), Some(DW_FORM_strp));
        assert_eq!(decl.form_of(DW_AT_type), None);
    }
}
