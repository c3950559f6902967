//! Type system definitions
//!
//! The language has one integer width (8 bytes), pointers and arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size in bytes of `int` and of every pointer
pub const WORD_SIZE: u64 = 8;

/// Largest object a declaration may create; its address stays within a
/// signed 32-bit displacement of the frame base
pub const MAX_OBJECT_SIZE: u64 = i32::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// The single integer type
    Int,

    /// Pointer to another type
    Pointer(Box<Type>),

    /// Array type; `len` is `None` for the unsized `[]` dimension of a parameter
    Array {
        element: Box<Type>,
        len: Option<u64>,
    },
}

impl Type {
    pub fn pointer_to(target: Type) -> Type {
        Type::Pointer(Box::new(target))
    }

    pub fn array_of(element: Type, len: Option<u64>) -> Type {
        Type::Array { element: Box::new(element), len }
    }

    /// Size in bytes. An unsized array occupies no storage of its own.
    /// Saturates at `u64::MAX`; declarations are kept far below that.
    pub fn size(&self) -> u64 {
        self.checked_size().unwrap_or(u64::MAX)
    }

    /// Size in bytes, or `None` if it does not fit in a `u64`
    pub fn checked_size(&self) -> Option<u64> {
        match self {
            Type::Int | Type::Pointer(_) => Some(WORD_SIZE),
            Type::Array { element, len } => element.checked_size()?.checked_mul(len.unwrap_or(0)),
        }
    }

    /// Alignment in bytes
    pub fn align(&self) -> u64 {
        match self {
            Type::Int | Type::Pointer(_) => WORD_SIZE,
            Type::Array { element, .. } => element.align(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Target of a pointer type
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer(target) => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Pointer(target) => write!(f, "{}*", target),
            Type::Array { .. } => {
                // Outermost dimension first, as written in a declaration
                let mut dims = Vec::new();
                let mut base = self;
                while let Type::Array { element, len } = base {
                    dims.push(*len);
                    base = element.as_ref();
                }
                write!(f, "{}", base)?;
                for dim in dims {
                    match dim {
                        Some(n) => write!(f, "[{}]", n)?,
                        None => write!(f, "[]")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Round `value` up to the next multiple of `align`
pub fn align_to(value: u64, align: u64) -> u64 {
    if align == 0 {
        return value;
    }
    value.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sizes() {
        assert_eq!(Type::Int.size(), 8);
        assert_eq!(Type::Int.align(), 8);
        assert_eq!(Type::pointer_to(Type::Int).size(), 8);
        assert_eq!(Type::pointer_to(Type::Int).align(), 8);
    }

    #[test]
    fn test_array_sizes() {
        // int a[3][2]
        let row = Type::array_of(Type::Int, Some(2));
        let matrix = Type::array_of(row.clone(), Some(3));

        assert_eq!(row.size(), 16);
        assert_eq!(matrix.size(), 48);
        assert_eq!(matrix.align(), 8);
        assert_eq!(matrix, Type::Array { element: Box::new(row.clone()), len: Some(3) });

        let unsized_param = Type::array_of(Type::Int, None);
        assert_eq!(unsized_param.size(), 0);
    }

    #[test]
    fn test_oversized_array_saturates() {
        let huge = Type::array_of(Type::Int, Some(i64::MAX as u64));
        assert_eq!(huge.checked_size(), None);
        assert_eq!(huge.size(), u64::MAX);

        let square = Type::array_of(Type::array_of(Type::Int, Some(1 << 32)), Some(1 << 32));
        assert_eq!(square.checked_size(), None);
    }

    #[test]
    fn test_type_display() {
        assert_eq!(Type::Int.to_string(), "int");
        assert_eq!(Type::pointer_to(Type::pointer_to(Type::Int)).to_string(), "int**");
        assert_eq!(
            Type::array_of(Type::array_of(Type::Int, Some(2)), Some(3)).to_string(),
            "int[3][2]"
        );
        assert_eq!(Type::array_of(Type::Int, None).to_string(), "int[]");
    }

    #[test]
    fn test_align_to() {
        assert_eq!(align_to(0, 16), 0);
        assert_eq!(align_to(8, 16), 16);
        assert_eq!(align_to(16, 16), 16);
        assert_eq!(align_to(17, 8), 24);
    }
}
