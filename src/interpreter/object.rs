use std::{
    cell::RefCell,
    fmt,
    hash::Hasher,
    rc::Rc,
};

use fnv::FnvHasher;

use crate::{
    ast::Block,
    error::RuntimeError,
    interpreter::environment::Environment,
};

/// The native signature of a builtin function.
///
/// Builtins receive the already-evaluated arguments plus the call's source
/// line for error reporting. `None` means the builtin produced no
/// meaningful value (as `print` does).
pub type BuiltinFn = fn(&[Object], usize) -> Result<Option<Object>, RuntimeError>;

/// Represents a runtime value in the interpreter.
///
/// This enum models everything an expression can produce. Numbers keep
/// their literal digits verbatim, so the integer-versus-float decision is
/// deferred to the operation that consumes them.
#[derive(Clone)]
pub enum Object {
    /// A numeric value, stored as its literal text.
    Number(String),
    /// A string value.
    String(String),
    /// A boolean value, produced by `==` and `!=`.
    Boolean(bool),
    /// The null value.
    Null,
    /// A propagation sentinel wrapping the value of a `return` statement.
    /// Never user-visible: block evaluation passes it outward unchanged and
    /// the program or call boundary unwraps it.
    ReturnValue(Box<Object>),
    /// A function value: a closure over its definition-time environment.
    Function {
        /// Parameter names, in declaration order.
        parameters: Vec<String>,
        /// The function body.
        body: Block,
        /// The captured environment. Fixed at creation, never reassigned;
        /// calls chain their frame onto this, not onto the caller's scope.
        env: Rc<RefCell<Environment>>,
    },
    /// A builtin: a name bound to a native function.
    Builtin {
        /// The registry name.
        name: String,
        /// The native implementation.
        function: BuiltinFn,
    },
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) => f.debug_tuple("Number").field(text).finish(),
            Self::String(text) => f.debug_tuple("String").field(text).finish(),
            Self::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Self::Null => write!(f, "Null"),
            Self::ReturnValue(inner) => f.debug_tuple("ReturnValue").field(inner).finish(),
            // A function bound in the scope it captured refers back to
            // itself through that scope, so the environment stays out of
            // the output.
            Self::Function { parameters, .. } => f
                .debug_struct("Function")
                .field("parameters", parameters)
                .finish_non_exhaustive(),
            Self::Builtin { name, .. } => {
                f.debug_struct("Builtin").field("name", name).finish_non_exhaustive()
            },
        }
    }
}

/// The tag of an [`Object`] variant, for error messages and hash keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A numeric value.
    Number,
    /// A string value.
    String,
    /// A boolean value.
    Boolean,
    /// The null value.
    Null,
    /// The return propagation sentinel.
    ReturnValue,
    /// A function closure.
    Function,
    /// A builtin function.
    Builtin,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::ReturnValue => "RETURN_VALUE",
            Self::Function => "FUNCTION",
            Self::Builtin => "BUILTIN",
        };
        write!(f, "{s}")
    }
}

/// A content hash for hashable objects: the variant tag plus a 64-bit
/// FNV-1a hash of the literal text.
///
/// Reserved for future associative container types; nothing consumes these
/// keys yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    /// Which variant the key came from, so equal text in a number and a
    /// string cannot collide.
    pub kind: ObjectKind,
    /// The FNV-1a hash of the literal text.
    pub key: u64,
}

impl Object {
    /// The variant tag of this value.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Number(_) => ObjectKind::Number,
            Self::String(_) => ObjectKind::String,
            Self::Boolean(_) => ObjectKind::Boolean,
            Self::Null => ObjectKind::Null,
            Self::ReturnValue(_) => ObjectKind::ReturnValue,
            Self::Function { .. } => ObjectKind::Function,
            Self::Builtin { .. } => ObjectKind::Builtin,
        }
    }

    /// The content hash of this value, for the variants that have one
    /// (numbers and strings). Everything else returns `None`.
    #[must_use]
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Self::Number(text) | Self::String(text) => {
                let mut hasher = FnvHasher::default();
                hasher.write(text.as_bytes());
                Some(HashKey { kind: self.kind(), key: hasher.finish() })
            },
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) | Self::String(text) => write!(f, "{text}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::ReturnValue(inner) => write!(f, "{inner}"),
            Self::Function { parameters, body, .. } => {
                write!(f, "func({}) {body}", parameters.join(", "))
            },
            Self::Builtin { name, .. } => write!(f, "builtin function {name}"),
        }
    }
}
