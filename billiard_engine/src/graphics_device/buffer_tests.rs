use super::*;

#[test]
fn test_index_type_size() {
    assert_eq!(IndexType::U16.size(), 2);
    assert_eq!(IndexType::U32.size(), 4);
}

#[test]
fn test_interleaved_table_layout() {
    // position, normal, uv
    let layout = VertexLayout::interleaved(&[(0, 3), (1, 3), (2, 2)]);
    assert_eq!(layout.stride, 32);
    assert_eq!(layout.attributes[0], VertexAttribute { location: 0, components: 3, offset: 0 });
    assert_eq!(layout.attributes[1], VertexAttribute { location: 1, components: 3, offset: 12 });
    assert_eq!(layout.attributes[2], VertexAttribute { location: 2, components: 2, offset: 24 });
    assert_eq!(layout.vertex_size(), 32);
}

#[test]
fn test_single_attribute_is_tightly_packed() {
    let layout = VertexLayout::interleaved(&[(0, 4)]);
    assert_eq!(layout.stride, 0);
    assert_eq!(layout.vertex_size(), 16);
}

#[test]
fn test_empty_layout() {
    let layout = VertexLayout::interleaved(&[]);
    assert!(layout.attributes.is_empty());
    assert_eq!(layout.vertex_size(), 0);
}
