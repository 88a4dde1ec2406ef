use vitae_protocol::{DomCommand, ElementTag, Length, NodeId, Point, StyleProperty, ThemeToken};

use super::NodeAllocator;
use crate::config::FloatingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shape {
    node: NodeId,
    /// Percent of the container.
    position: Point,
    velocity: Point,
}

/// Slowly drifting decorative shapes in the hero, positioned in percent.
#[derive(Debug, Clone)]
pub struct FloatingShapes {
    shapes: Vec<Shape>,
}

impl FloatingShapes {
    pub fn mount(
        container: NodeId,
        config: &FloatingConfig,
        rng: &mut fastrand::Rng,
        alloc: &mut NodeAllocator,
        out: &mut Vec<DomCommand>,
    ) -> Self {
        let mut shapes = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            let node = alloc.alloc();
            let width = config.min_size + rng.f64() * (config.max_size - config.min_size);
            let height = config.min_size + rng.f64() * (config.max_size - config.min_size);
            let round = rng.bool();
            let shape = Shape {
                node,
                position: Point::new(rng.f64() * 100.0, rng.f64() * 100.0),
                velocity: Point::new(
                    (rng.f64() * 2.0 - 1.0) * config.max_speed,
                    (rng.f64() * 2.0 - 1.0) * config.max_speed,
                ),
            };

            out.push(DomCommand::CreateElement {
                node,
                parent: Some(container),
                tag: ElementTag::Div,
                class: "floating-element".into(),
                text: None,
            });
            out.push(DomCommand::SetStyle {
                node,
                property: StyleProperty::Width,
                value: Length::Px(width).to_string().into(),
            });
            out.push(DomCommand::SetStyle {
                node,
                property: StyleProperty::Height,
                value: Length::Px(height).to_string().into(),
            });
            out.push(DomCommand::SetStyle {
                node,
                property: StyleProperty::BorderRadius,
                value: (if round { "50%" } else { "0" }).into(),
            });
            out.push(DomCommand::SetBackground {
                node,
                color: ThemeToken::FloatingShape,
            });
            place(&shape, out);
            shapes.push(shape);
        }
        Self { shapes }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn frame(&mut self, out: &mut Vec<DomCommand>) {
        for shape in &mut self.shapes {
            shape.position.x += shape.velocity.x;
            shape.position.y += shape.velocity.y;
            if shape.position.x <= 0.0 || shape.position.x >= 100.0 {
                shape.velocity.x = -shape.velocity.x;
            }
            if shape.position.y <= 0.0 || shape.position.y >= 100.0 {
                shape.velocity.y = -shape.velocity.y;
            }
            shape.position.x = shape.position.x.clamp(0.0, 100.0);
            shape.position.y = shape.position.y.clamp(0.0, 100.0);
            place(shape, out);
        }
    }
}

fn place(shape: &Shape, out: &mut Vec<DomCommand>) {
    out.push(DomCommand::SetStyle {
        node: shape.node,
        property: StyleProperty::Left,
        value: Length::Percent(shape.position.x).to_string().into(),
    });
    out.push(DomCommand::SetStyle {
        node: shape.node,
        property: StyleProperty::Top,
        value: Length::Percent(shape.position.y).to_string().into(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> (FloatingShapes, Vec<DomCommand>) {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut alloc = NodeAllocator::default();
        let mut out = Vec::new();
        let shapes = FloatingShapes::mount(
            NodeId(5),
            &FloatingConfig::default(),
            &mut rng,
            &mut alloc,
            &mut out,
        );
        (shapes, out)
    }

    #[test]
    fn creates_six_shapes_in_container() {
        let (shapes, out) = shapes();
        assert_eq!(shapes.len(), 6);
        let created = out
            .iter()
            .filter(|c| matches!(c, DomCommand::CreateElement { parent: Some(NodeId(5)), .. }))
            .count();
        assert_eq!(created, 6);
    }

    #[test]
    fn stays_within_container() {
        let (mut shapes, _) = shapes();
        let mut out = Vec::new();
        for _ in 0..2000 {
            shapes.frame(&mut out);
        }
        for shape in &shapes.shapes {
            assert!((0.0..=100.0).contains(&shape.position.x));
            assert!((0.0..=100.0).contains(&shape.position.y));
        }
    }

    #[test]
    fn bounces_off_edge() {
        let mut shapes = FloatingShapes {
            shapes: vec![Shape {
                node: NodeId(1),
                position: Point::new(99.9, 50.0),
                velocity: Point::new(0.2, 0.0),
            }],
        };
        let mut out = Vec::new();
        shapes.frame(&mut out);
        assert_eq!(shapes.shapes[0].position.x, 100.0);
        assert!(shapes.shapes[0].velocity.x < 0.0);
        assert_eq!(
            out[0],
            DomCommand::SetStyle {
                node: NodeId(1),
                property: StyleProperty::Left,
                value: "100%".into()
            }
        );
    }
}
