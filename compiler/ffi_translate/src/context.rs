//! Where a rejected type was found.
//!
//! Each variant becomes one note when a rejection propagates out of it, so
//! the user can find the offending declaration from the diagnostics alone.

/// An enclosing context of a rejected type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContextKind {
    /// The underlying type of a type alias.
    TypedefAlias { name: String },
    /// The return type of a function pointer prototype.
    PrototypeReturn,
    /// A parameter type of a function pointer prototype.
    PrototypeParam {
        /// Zero-based parameter index.
        index: usize,
    },
    /// A function parameter; unnamed parameters are identified by index.
    Parameter { name: String, index: usize },
    /// A global variable.
    Variable { name: String },
    /// A function, abandoned because of its signature.
    Function { name: String },
    /// The integer type of an enum.
    EnumUnderlying { name: String },
    /// A struct field.
    StructField { field: String, structure: String },
}

impl ContextKind {
    /// Note text for this context.
    pub fn describe(&self) -> String {
        match self {
            Self::TypedefAlias { name } => {
                format!("in typedef declaration for type alias `{name}`")
            }
            Self::PrototypeReturn => "in the return type of this function pointer".to_string(),
            Self::PrototypeParam { index } => format!(
                "in the {} parameter type of this function pointer",
                ordinal(*index + 1)
            ),
            Self::Parameter { name, index } if name.is_empty() => {
                format!("in declaration for the {} parameter", ordinal(*index + 1))
            }
            Self::Parameter { name, .. } => format!("in declaration for parameter `{name}`"),
            Self::Variable { name } => format!("in declaration for variable `{name}`"),
            Self::Function { name } => {
                format!("declaration for function `{name}` is therefore ignored")
            }
            Self::EnumUnderlying { name } => {
                format!("in the underlying type for enumeration `{name}`")
            }
            Self::StructField { field, structure } => {
                format!("in declaration of field `{field}` of struct `{structure}`")
            }
        }
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{n}{suffix}")
}
