//! The interactive particle background of the hero section.

use vitae_protocol::{DomCommand, ElementTag, NodeId, Point, Size, ThemeToken};

use crate::config::ParticlesConfig;
use crate::model::Particle;

#[derive(Debug, Clone)]
pub struct ParticleField {
    canvas: NodeId,
    size: Size,
    particles: Vec<Particle>,
    pointer: Option<Point>,
    config: ParticlesConfig,
}

impl ParticleField {
    pub fn new(canvas: NodeId, size: Size, config: ParticlesConfig, rng: &mut fastrand::Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::random(rng, size, &config))
            .collect();
        Self {
            canvas,
            size,
            particles,
            pointer: None,
            config,
        }
    }

    pub fn canvas(&self) -> NodeId {
        self.canvas
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Create the canvas inside `container`, sized to it.
    pub fn mount(&self, container: NodeId, out: &mut Vec<DomCommand>) {
        out.push(DomCommand::CreateElement {
            node: self.canvas,
            parent: Some(container),
            tag: ElementTag::Canvas,
            class: "particle-canvas".into(),
            text: None,
        });
        out.push(DomCommand::ResizeCanvas {
            node: self.canvas,
            size: self.size,
        });
    }

    pub fn resize(&mut self, size: Size, out: &mut Vec<DomCommand>) {
        self.size = size;
        out.push(DomCommand::ResizeCanvas {
            node: self.canvas,
            size,
        });
    }

    /// Pointer position relative to the container.
    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = Some(pointer);
    }

    pub fn frame(&mut self, out: &mut Vec<DomCommand>) {
        out.push(DomCommand::ClearCanvas { node: self.canvas });

        for particle in &mut self.particles {
            particle.step(self.size);
            if let Some(pointer) = self.pointer {
                particle.repel(
                    pointer,
                    self.config.pointer_radius,
                    self.config.pointer_strength,
                );
            }
        }

        for particle in &self.particles {
            out.push(DomCommand::FillCircle {
                node: self.canvas,
                center: particle.position,
                radius: particle.radius,
                color: ThemeToken::ParticleFill,
                alpha: particle.opacity,
            });
        }

        let max = self.config.link_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if distance < max {
                    out.push(DomCommand::StrokeLine {
                        node: self.canvas,
                        from: a.position,
                        to: b.position,
                        color: ThemeToken::ParticleLink,
                        alpha: self.config.link_alpha * (max - distance) / max,
                        width: 1.0,
                    });
                }
            }
        }
    }
}
