use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! parse_error {
    ($msg:expr) => {
        crate::Error::Parse {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Parse {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all conditions that can occur while decoding DWARF debugging
/// information: low-level byte access failures, malformed binary structures, and the
/// recoverable lookup outcomes the abbreviation table distinguishes from fatal decode
/// failures.
///
/// # Error Categories
///
/// ## Stream and Decode Errors
/// - [`Error::OutOfBounds`] - Attempted to read beyond the data boundaries
/// - [`Error::Malformed`] - Corrupted or invalid binary structure at the io/parser layer
/// - [`Error::Parse`] - Unified record-decode failure surfaced by [`crate::stream::parse_record_at`]
///
/// ## Lookup and Contract Errors
/// - [`Error::AbbrevNotFound`] - A requested abbreviation code does not exist in the table
/// - [`Error::NoSuchField`] - A key-based field accessor was given an unknown field name
///
/// ## Format Assertions
/// - [`Error::Format`] - A general binary-format invariant did not hold
/// - [`Error::Dwarf`] - A DWARF-specific invariant did not hold
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Error`] - Miscellaneous failures (e.g. memory mapping)
///
/// # Examples
///
/// ```rust
/// use dwarfscope::{AbbrevTable, Error, Memory};
///
/// let section = Memory::new(vec![0x00]); // empty table, terminator only
/// let mut table = AbbrevTable::new(&section, 0);
///
/// match table.get_abbrev(1) {
///     Ok(decl) => println!("tag: {}", decl.tag()),
///     Err(Error::AbbrevNotFound(code)) => {
///         eprintln!("no declaration for code {code}");
///     }
///     Err(Error::Parse { message, file, line }) => {
///         eprintln!("corrupt table: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An out of bound access was attempted while reading from the data.
    ///
    /// This error occurs when trying to read or seek beyond the end of the
    /// section data. It's a safety check to prevent buffer overruns during parsing.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The data is damaged and could not be decoded at the io/parser layer.
    ///
    /// This error indicates a structural problem below the record level, such as a
    /// ULEB128 varint whose continuation bytes overflow the result type. The error
    /// includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A record could not be decoded at the current stream position.
    ///
    /// This is the single unified decode-failure kind surfaced by
    /// [`crate::stream::parse_record_at`]: any underlying io error (truncated data,
    /// invalid varint, layout mismatch) is re-signaled as `Parse` carrying the
    /// original message, so record consumers never depend on the io layer's own
    /// error kinds. The stream position after this failure is unspecified; callers
    /// must reseek before reading again.
    ///
    /// # Fields
    ///
    /// * `message` - The original decode failure, rendered as text
    /// * `file` - Source file where the failure was wrapped
    /// * `line` - Source line where the failure was wrapped
    #[error("Parse - {file}:{line}: {message}")]
    Parse {
        /// The message to be printed for the Parse error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// No abbreviation declaration exists for the requested code.
    ///
    /// This is an expected, recoverable outcome: the table terminator was reached
    /// without producing the code. It signals a data-integrity problem in the
    /// consuming compilation unit (a DIE referencing a code its table never
    /// defines), not a programming error, and is surfaced distinctly from decode
    /// failures so higher layers can decide whether it is fatal.
    #[error("No abbreviation declaration with code {0}")]
    AbbrevNotFound(u64),

    /// A key-based field accessor was given a field name the record does not define.
    ///
    /// This is a contract violation and should not occur under normal library use;
    /// the typed accessors are the preferred path and cannot produce it.
    #[error("No such field - {0}")]
    NoSuchField(String),

    /// A general binary-format invariant did not hold.
    ///
    /// Raised by [`format_assert`] on behalf of higher layers asserting container
    /// and section invariants.
    #[error("Format error - {0}")]
    Format(String),

    /// A DWARF-specific invariant did not hold.
    ///
    /// Raised by [`dwarf_assert`] on behalf of higher layers asserting
    /// debug-information invariants.
    #[error("DWARF error - {0}")]
    Dwarf(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations
    /// such as reading from disk, permission issues, or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories, such as
    /// memory-mapping failures in the physical backend.
    #[error("{0}")]
    Error(String),
}

/// Assert that `cond` holds, otherwise fail with [`Error::Format`] carrying `msg`.
///
/// Thin helper for higher layers that convert boolean format invariants into
/// errors instead of panics.
///
/// # Errors
/// Returns [`Error::Format`] when `cond` is `false`.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::format_assert;
///
/// format_assert(4 % 2 == 0, "section size must be even")?;
/// assert!(format_assert(false, "bad magic").is_err());
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub fn format_assert(cond: bool, msg: &str) -> crate::Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::Format(msg.to_string()))
    }
}

/// Assert that `cond` holds, otherwise fail with [`Error::Dwarf`] carrying `msg`.
///
/// The DWARF-specific sibling of [`format_assert`], used for invariants of the
/// debug-information structures themselves.
///
/// # Errors
/// Returns [`Error::Dwarf`] when `cond` is `false`.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::dwarf_assert;
///
/// let version = 4u16;
/// dwarf_assert(version >= 2, "unsupported DWARF version")?;
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub fn dwarf_assert(cond: bool, msg: &str) -> crate::Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::Dwarf(msg.to_string()))
    }
}
