/// Buffer trait, vertex layout and index types

/// What a buffer is bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// GL_ARRAY_BUFFER
    Vertex,
    /// GL_ELEMENT_ARRAY_BUFFER
    Index,
}

/// Index element type for indexed draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U16,
    U32,
}

impl IndexType {
    /// Size of one index in bytes
    pub fn size(self) -> usize {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// One float vertex attribute inside an interleaved vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Number of f32 components (1..=4)
    pub components: u32,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

/// Interleaved float vertex layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Byte stride between consecutive vertices (0 = tightly packed)
    pub stride: u32,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Build a layout from `(location, components)` pairs laid out back to back
    pub fn interleaved(components: &[(u32, u32)]) -> Self {
        let mut offset = 0;
        let attributes = components
            .iter()
            .map(|&(location, count)| {
                let attr = VertexAttribute { location, components: count, offset };
                offset += count * std::mem::size_of::<f32>() as u32;
                attr
            })
            .collect::<Vec<_>>();
        let stride = if attributes.len() > 1 { offset } else { 0 };
        Self { stride, attributes }
    }

    /// Size of one vertex in bytes
    pub fn vertex_size(&self) -> u32 {
        if self.stride != 0 {
            return self.stride;
        }
        self.attributes
            .iter()
            .map(|a| a.offset + a.components * std::mem::size_of::<f32>() as u32)
            .max()
            .unwrap_or(0)
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., GlBuffer).
/// The buffer is destroyed when dropped.
pub trait Buffer {
    fn kind(&self) -> BufferKind;

    /// Size in bytes
    fn size(&self) -> usize;
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
