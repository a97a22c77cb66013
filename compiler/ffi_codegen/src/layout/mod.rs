//! Natural struct layout.
//!
//! The front end does not say whether a struct is packed, so every struct is
//! laid out naturally: each field starts at the running size rounded up to
//! the field's alignment, and the struct is as aligned as its most aligned
//! field. Packed structs therefore get wrong offsets; the driver warns about
//! that once per run.

use std::collections::BTreeMap;

use ffi_ir::{CType, Qualifier, ScalarType, TagType, Width};
use ffi_stack::with_stack;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Size and alignment of a type, in bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Layout {
    pub size: u64,
    pub align: u64,
}

impl Layout {
    pub const fn new(size: u64, align: u64) -> Self {
        Layout { size, align }
    }

    /// A type aligned to its own size.
    pub const fn natural(size: u64) -> Self {
        Layout { size, align: size }
    }
}

/// Round `offset` up to a multiple of `align`. An alignment of zero or one
/// leaves the offset unchanged.
pub fn align_up(offset: u64, align: u64) -> u64 {
    if align <= 1 {
        return offset;
    }
    offset.div_ceil(align) * align
}

/// Field offsets plus the layout of the whole struct.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StructLayout {
    pub offsets: Vec<u64>,
    /// Total size, including trailing padding.
    pub size: u64,
    pub align: u64,
}

/// Lay out fields in order with natural alignment.
pub fn natural_layout(fields: &[Layout]) -> StructLayout {
    let mut offsets = Vec::with_capacity(fields.len());
    let mut size = 0;
    let mut align = 1;
    for field in fields {
        let offset = align_up(size, field.align);
        offsets.push(offset);
        size = offset + field.size;
        align = align.max(field.align);
    }
    StructLayout {
        offsets,
        size: align_up(size, align),
        align,
    }
}

/// The C data model the generated code will run on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLayout {
    /// 64-bit Unix: `long` and pointers are 8 bytes.
    #[default]
    Lp64,
    /// 64-bit Windows: `long` is 4 bytes, `wchar_t` 2.
    Llp64,
    /// 32-bit x86 System V: pointers are 4 bytes and 8-byte scalars are
    /// 4-aligned inside structs.
    Ilp32,
}

impl TargetLayout {
    pub fn pointer(self) -> Layout {
        match self {
            TargetLayout::Lp64 | TargetLayout::Llp64 => Layout::natural(8),
            TargetLayout::Ilp32 => Layout::natural(4),
        }
    }

    /// Layout of a sized scalar; `None` for `void`.
    pub fn scalar(self, scalar: &ScalarType) -> Option<Layout> {
        let size = match scalar.qualifier {
            Qualifier::Void => return None,
            Qualifier::Bool | Qualifier::Char => 1,
            Qualifier::WChar => match self {
                TargetLayout::Llp64 => 2,
                TargetLayout::Lp64 | TargetLayout::Ilp32 => 4,
            },
            Qualifier::Short => 2,
            Qualifier::Int | Qualifier::Float => 4,
            Qualifier::Long => match self {
                TargetLayout::Lp64 => 8,
                TargetLayout::Llp64 | TargetLayout::Ilp32 => 4,
            },
            Qualifier::LLong | Qualifier::Double => 8,
            Qualifier::Ptrdiff | Qualifier::Size => self.pointer().size,
            Qualifier::Special => match scalar.width {
                Width::Max => 8,
                _ => self.pointer().size,
            },
            // Least and fast types are laid out at their nominal width.
            Qualifier::UniChar | Qualifier::Exact | Qualifier::Least | Qualifier::Fast => {
                scalar.width.bytes()?
            }
        };
        let align = match self {
            TargetLayout::Ilp32 => size.min(4),
            TargetLayout::Lp64 | TargetLayout::Llp64 => size,
        };
        Some(Layout::new(size, align))
    }
}

/// Computes layouts of types against the tags of one module.
pub struct LayoutContext<'a> {
    target: TargetLayout,
    tags: &'a BTreeMap<String, TagType>,
    /// Structs currently being laid out; a by-value cycle has no layout.
    in_progress: FxHashSet<&'a str>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(target: TargetLayout, tags: &'a BTreeMap<String, TagType>) -> Self {
        LayoutContext {
            target,
            tags,
            in_progress: FxHashSet::default(),
        }
    }

    /// Layout of `ty`, or `None` when its size is unknown: `void`, function
    /// types, and tags not defined in this module.
    pub fn type_layout(&mut self, ty: &CType) -> Option<Layout> {
        match ty {
            CType::Scalar(scalar) => self.target.scalar(scalar),
            CType::Pointer { .. } => Some(self.target.pointer()),
            CType::Function(_) => None,
            CType::Opaque { name } => {
                let tags = self.tags;
                let (name, tag) = tags.get_key_value(name.as_str())?;
                match tag {
                    TagType::Enumeration(e) => with_stack(|| self.type_layout(&e.underlying_type)),
                    TagType::Structure(_) => {
                        let layout = self.struct_layout(name)?;
                        Some(Layout::new(layout.size, layout.align))
                    }
                }
            }
        }
    }

    /// Layout of the struct `name` defined in this module.
    pub fn struct_layout(&mut self, name: &str) -> Option<StructLayout> {
        let tags = self.tags;
        let (name, tag) = tags.get_key_value(name)?;
        let TagType::Structure(structure) = tag else {
            return None;
        };
        if !self.in_progress.insert(name.as_str()) {
            return None;
        }
        let fields = structure
            .fields
            .iter()
            .map(|field| with_stack(|| self.type_layout(&field.ty)))
            .collect::<Option<Vec<_>>>();
        self.in_progress.remove(name.as_str());
        Some(natural_layout(&fields?))
    }
}

#[cfg(test)]
mod tests;
