//! Boundary container transfer support.
//!
//! A [`ContainerWrapper`] is the fixed-size boundary value that moves
//! ownership of one dynamically-sized container (dynamic array or text
//! buffer) across the boundary without copying. The held container's
//! element kind comes from a closed, statically enumerated set
//! ([`ElementKind`]); dispatch over it is an exhaustive `match` on the
//! internal tag, never runtime type inspection.
//!
//! # Lifecycle
//!
//! - A transfer-producing wrapper function constructs the wrapper directly
//!   into caller-supplied storage ([`ContainerWrapper::emplace`]); no heap
//!   allocation happens beyond what the container itself already owns.
//! - The caller queries it through [`len`](ContainerWrapper::len) and the
//!   per-kind `get_*` accessors.
//! - [`release`](ContainerWrapper::release) runs the held container's
//!   destructor in place and resets the tag to empty. It must be called
//!   exactly once per successful construction. Any `len` or `get_*` after
//!   release is a usage error and reports [`ContainerError::Empty`].
//!
//! # Safety invariant
//!
//! Copying a non-empty wrapper at the byte level is undefined: the held
//! container is not trivially relocatable in general. Only the wrapper
//! functions generated for copy/move are safe. (In Rust terms the type is
//! neither `Copy` nor `Clone`; the invariant matters for the C side.)
//!
//! Each wrapper instance is exclusively owned by its caller, so access
//! through it is reentrant and thread-safe per instance.

use std::mem::MaybeUninit;

use thiserror::Error;

/// Errors from container wrapper access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// The wrapper holds nothing: never filled, or already released.
    #[error("container wrapper is empty (never filled or already released)")]
    Empty,

    /// Element index past the end of the held container.
    #[error("index {index} out of bounds for container of {len} elements")]
    OutOfBounds { index: usize, len: usize },

    /// Accessor for one element kind used on a container of another.
    #[error("container holds {actual} elements, accessor expects {expected}")]
    WrongElementKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// Packed value-element buffer whose length is not a multiple of the
    /// element stride.
    #[error("value buffer of {len} bytes is not a multiple of stride {stride}")]
    UnevenValueBuffer { len: usize, stride: usize },
}

/// The closed set of container element kinds the transfer engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    /// Fixed-size value-type elements, stored packed with the given stride.
    Value { size: usize, align: usize },
    /// Text buffer; elements are bytes.
    Text,
}

impl ElementKind {
    /// Identifier tag used in auxiliary wrapper names
    /// (`container_<tag>_size`, `container_<tag>_get`).
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Bool => "bool",
            ElementKind::Int8 => "int8",
            ElementKind::Int16 => "int16",
            ElementKind::Int32 => "int",
            ElementKind::Int64 => "int64",
            ElementKind::Uint8 => "uint8",
            ElementKind::Uint16 => "uint16",
            ElementKind::Uint32 => "uint",
            ElementKind::Uint64 => "uint64",
            ElementKind::Float32 => "float",
            ElementKind::Float64 => "double",
            ElementKind::Value { .. } => "value",
            ElementKind::Text => "text",
        }
    }

    /// The C spelling of one element in a borrowed buffer of this kind.
    /// Value elements cross as raw bytes, text as `char`.
    pub fn c_name(&self) -> &'static str {
        match self {
            ElementKind::Bool => "bool",
            ElementKind::Int8 => "int8_t",
            ElementKind::Int16 => "int16_t",
            ElementKind::Int32 => "int32_t",
            ElementKind::Int64 => "int64_t",
            ElementKind::Uint8 => "uint8_t",
            ElementKind::Uint16 => "uint16_t",
            ElementKind::Uint32 => "uint32_t",
            ElementKind::Uint64 => "uint64_t",
            ElementKind::Float32 => "float",
            ElementKind::Float64 => "double",
            ElementKind::Value { .. } => "uint8_t",
            ElementKind::Text => "char",
        }
    }
}

/// The held container, selected by tag. One variant per supported element
/// kind plus the empty state.
#[derive(Debug, PartialEq)]
enum Payload {
    Empty,
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Uint64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    /// Packed fixed-size value elements.
    Value {
        bytes: Vec<u8>,
        stride: usize,
        align: usize,
    },
    Text(String),
}

impl Payload {
    fn kind(&self) -> Option<ElementKind> {
        match self {
            Payload::Empty => None,
            Payload::Bool(_) => Some(ElementKind::Bool),
            Payload::Int8(_) => Some(ElementKind::Int8),
            Payload::Int16(_) => Some(ElementKind::Int16),
            Payload::Int32(_) => Some(ElementKind::Int32),
            Payload::Int64(_) => Some(ElementKind::Int64),
            Payload::Uint8(_) => Some(ElementKind::Uint8),
            Payload::Uint16(_) => Some(ElementKind::Uint16),
            Payload::Uint32(_) => Some(ElementKind::Uint32),
            Payload::Uint64(_) => Some(ElementKind::Uint64),
            Payload::Float32(_) => Some(ElementKind::Float32),
            Payload::Float64(_) => Some(ElementKind::Float64),
            Payload::Value { stride, align, .. } => Some(ElementKind::Value {
                size: *stride,
                align: *align,
            }),
            Payload::Text(_) => Some(ElementKind::Text),
        }
    }

    fn kind_name(&self) -> &'static str {
        self.kind().map_or("empty", |k| k.tag())
    }
}

/// Fixed-size boundary value owning at most one container instance.
///
/// See the module docs for the lifecycle and safety contract.
#[derive(Debug, PartialEq)]
pub struct ContainerWrapper {
    payload: Payload,
}

impl Default for ContainerWrapper {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! numeric_payloads {
    ($(($variant:ident, $elem:ty, $adopt:ident, $copy_from:ident, $get:ident)),+ $(,)?) => {
        impl ContainerWrapper {
            $(
                /// Take ownership of an existing container. Zero-copy: the
                /// buffer moves in as-is.
                pub fn $adopt(elements: Vec<$elem>) -> Self {
                    Self { payload: Payload::$variant(elements) }
                }

                /// Build an owned container from caller-managed borrowed
                /// memory. The source is a raw (pointer, length) view, not
                /// an owned container, so this path always copies.
                pub fn $copy_from(elements: &[$elem]) -> Self {
                    Self { payload: Payload::$variant(elements.to_vec()) }
                }

                /// Element accessor. Fails on the wrong element kind, a
                /// released/empty wrapper, or an out-of-range index.
                pub fn $get(&self, index: usize) -> Result<$elem, ContainerError> {
                    match &self.payload {
                        Payload::$variant(v) => {
                            v.get(index).copied().ok_or(ContainerError::OutOfBounds {
                                index,
                                len: v.len(),
                            })
                        }
                        Payload::Empty => Err(ContainerError::Empty),
                        other => Err(ContainerError::WrongElementKind {
                            expected: ElementKind::$variant.tag(),
                            actual: other.kind_name(),
                        }),
                    }
                }
            )+
        }
    };
}

numeric_payloads! {
    (Bool, bool, adopt_bool, copy_from_bool, get_bool),
    (Int8, i8, adopt_i8, copy_from_i8, get_i8),
    (Int16, i16, adopt_i16, copy_from_i16, get_i16),
    (Int32, i32, adopt_i32, copy_from_i32, get_i32),
    (Int64, i64, adopt_i64, copy_from_i64, get_i64),
    (Uint8, u8, adopt_u8, copy_from_u8, get_u8),
    (Uint16, u16, adopt_u16, copy_from_u16, get_u16),
    (Uint32, u32, adopt_u32, copy_from_u32, get_u32),
    (Uint64, u64, adopt_u64, copy_from_u64, get_u64),
    (Float32, f32, adopt_f32, copy_from_f32, get_f32),
    (Float64, f64, adopt_f64, copy_from_f64, get_f64),
}

impl ContainerWrapper {
    /// An empty wrapper holding nothing.
    pub fn new() -> Self {
        Self {
            payload: Payload::Empty,
        }
    }

    /// Placement-construct a wrapper into caller-allocated storage.
    ///
    /// This is the transfer-producing path: a wrapper function that returns
    /// a container writes the adopted container straight into the storage
    /// the caller passed by pointer, with no intermediate allocation.
    pub fn emplace(slot: &mut MaybeUninit<Self>, wrapper: Self) -> &mut Self {
        slot.write(wrapper)
    }

    /// Take ownership of a text buffer.
    pub fn adopt_text(text: String) -> Self {
        Self {
            payload: Payload::Text(text),
        }
    }

    /// Copy caller-managed text into an owned buffer.
    pub fn copy_from_text(text: &str) -> Self {
        Self::adopt_text(text.to_string())
    }

    /// Take ownership of packed fixed-size value elements.
    ///
    /// `bytes.len()` must be a multiple of `stride`.
    pub fn adopt_values(bytes: Vec<u8>, stride: usize, align: usize) -> Result<Self, ContainerError> {
        if stride == 0 || !bytes.len().is_multiple_of(stride) {
            return Err(ContainerError::UnevenValueBuffer {
                len: bytes.len(),
                stride,
            });
        }
        Ok(Self {
            payload: Payload::Value {
                bytes,
                stride,
                align,
            },
        })
    }

    /// The element kind currently held, `None` when empty.
    pub fn element_kind(&self) -> Option<ElementKind> {
        self.payload.kind()
    }

    /// Whether the wrapper currently holds a container.
    pub fn holds_container(&self) -> bool {
        !matches!(self.payload, Payload::Empty)
    }

    /// Number of elements in the held container.
    ///
    /// Text counts bytes; value containers count elements (bytes/stride).
    /// Calling this on an empty or released wrapper is a usage error.
    pub fn len(&self) -> Result<usize, ContainerError> {
        match &self.payload {
            Payload::Empty => Err(ContainerError::Empty),
            Payload::Bool(v) => Ok(v.len()),
            Payload::Int8(v) => Ok(v.len()),
            Payload::Int16(v) => Ok(v.len()),
            Payload::Int32(v) => Ok(v.len()),
            Payload::Int64(v) => Ok(v.len()),
            Payload::Uint8(v) => Ok(v.len()),
            Payload::Uint16(v) => Ok(v.len()),
            Payload::Uint32(v) => Ok(v.len()),
            Payload::Uint64(v) => Ok(v.len()),
            Payload::Float32(v) => Ok(v.len()),
            Payload::Float64(v) => Ok(v.len()),
            Payload::Value { bytes, stride, .. } => Ok(bytes.len() / stride),
            Payload::Text(s) => Ok(s.len()),
        }
    }

    /// Byte accessor for text containers.
    pub fn get_text_byte(&self, index: usize) -> Result<u8, ContainerError> {
        match &self.payload {
            Payload::Text(s) => s.as_bytes().get(index).copied().ok_or(
                ContainerError::OutOfBounds {
                    index,
                    len: s.len(),
                },
            ),
            Payload::Empty => Err(ContainerError::Empty),
            other => Err(ContainerError::WrongElementKind {
                expected: "text",
                actual: other.kind_name(),
            }),
        }
    }

    /// The whole held text buffer.
    pub fn as_text(&self) -> Result<&str, ContainerError> {
        match &self.payload {
            Payload::Text(s) => Ok(s),
            Payload::Empty => Err(ContainerError::Empty),
            other => Err(ContainerError::WrongElementKind {
                expected: "text",
                actual: other.kind_name(),
            }),
        }
    }

    /// Byte view of one packed value element.
    pub fn get_value(&self, index: usize) -> Result<&[u8], ContainerError> {
        match &self.payload {
            Payload::Value { bytes, stride, .. } => {
                let len = bytes.len() / stride;
                if index >= len {
                    return Err(ContainerError::OutOfBounds { index, len });
                }
                let start = index * stride;
                Ok(&bytes[start..start + stride])
            }
            Payload::Empty => Err(ContainerError::Empty),
            other => Err(ContainerError::WrongElementKind {
                expected: "value",
                actual: other.kind_name(),
            }),
        }
    }

    /// Run the held container's destructor in place and reset the tag to
    /// empty.
    ///
    /// Must be called exactly once per successful construction; calling it
    /// on an already-empty wrapper reports [`ContainerError::Empty`].
    pub fn release(&mut self) -> Result<(), ContainerError> {
        match self.payload {
            Payload::Empty => Err(ContainerError::Empty),
            _ => {
                // Dropping the old payload frees the container here, inside
                // the wrapper's storage slot.
                self.payload = Payload::Empty;
                Ok(())
            }
        }
    }
}
