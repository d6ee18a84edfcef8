//! Shape generation for 2D primitives

use glam::Vec2;

use super::DrawItem;
use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering `rect`, shifted so `origin` maps to (0, 0)
pub fn quad(rect: &Rect, color: [f32; 4], origin: Vec2) -> [Vertex; 6] {
    let l = rect.left - origin.x;
    let t = rect.top - origin.y;
    let r = rect.right() - origin.x;
    let b = rect.bottom() - origin.y;
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Triangle list for a whole draw list, in view space
pub fn quads(items: &[DrawItem], origin: Vec2) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(items.len() * 6);
    for item in items {
        vertices.extend_from_slice(&quad(&item.rect, item.class.color(), origin));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ColorClass;

    #[test]
    fn test_quad_offsets_by_origin() {
        let v = quad(
            &Rect::new(110.0, 220.0, 10.0, 5.0),
            [1.0; 4],
            Vec2::new(100.0, 200.0),
        );
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [20.0, 25.0]);
    }

    #[test]
    fn test_quads_cast_to_bytes() {
        let items = [
            DrawItem::new(Rect::new(0.0, 0.0, 25.0, 25.0), ColorClass::Player),
            DrawItem::new(Rect::new(30.0, 0.0, 10.0, 10.0), ColorClass::Bullet),
        ];
        let vertices = quads(&items, Vec2::ZERO);
        assert_eq!(vertices.len(), 12);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 12 * std::mem::size_of::<Vertex>());
        assert_eq!(vertices[6].color, ColorClass::Bullet.color());
    }
}
