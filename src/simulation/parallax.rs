//! Parallax background scrolling

use serde::Serialize;

/// Number of background layers
pub const LAYER_COUNT: usize = 4;

/// Background planes, ordered farthest to nearest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParallaxLayer {
    Clouds,
    Mountains,
    Trees,
    Road,
}

impl ParallaxLayer {
    pub const ALL: [ParallaxLayer; LAYER_COUNT] = [
        ParallaxLayer::Clouds,
        ParallaxLayer::Mountains,
        ParallaxLayer::Trees,
        ParallaxLayer::Road,
    ];

    /// Scroll distance per unit of vehicle travel
    pub fn rate(self) -> f64 {
        match self {
            ParallaxLayer::Clouds => 20.0,
            ParallaxLayer::Mountains => 50.0,
            ParallaxLayer::Trees => 100.0,
            ParallaxLayer::Road => 200.0,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Scroll output of one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollFrame {
    /// Distance each layer moved this tick
    pub deltas: [f64; LAYER_COUNT],
    /// Running total per layer
    pub offsets: [f64; LAYER_COUNT],
}

impl ScrollFrame {
    pub fn delta(&self, layer: ParallaxLayer) -> f64 {
        self.deltas[layer.index()]
    }

    pub fn offset(&self, layer: ParallaxLayer) -> f64 {
        self.offsets[layer.index()]
    }
}

/// Running scroll offsets for every layer.
///
/// Offsets only grow; wrapping to the texture width is left to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxScroller {
    rates: [f64; LAYER_COUNT],
    offsets: [f64; LAYER_COUNT],
}

impl Default for ParallaxScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallaxScroller {
    pub fn new() -> Self {
        Self::with_rates(ParallaxLayer::ALL.map(ParallaxLayer::rate))
    }

    /// Custom per-layer multipliers, indexed like [`ParallaxLayer::ALL`]
    pub fn with_rates(rates: [f64; LAYER_COUNT]) -> Self {
        Self {
            rates,
            offsets: [0.0; LAYER_COUNT],
        }
    }

    pub fn offsets(&self) -> [f64; LAYER_COUNT] {
        self.offsets
    }

    pub fn advance(&mut self, speed: f64, dt: f64) -> ScrollFrame {
        let deltas = self.rates.map(|rate| speed * dt * rate);
        for (offset, delta) in self.offsets.iter_mut().zip(deltas) {
            *offset += delta;
        }
        ScrollFrame {
            deltas,
            offsets: self.offsets,
        }
    }
}
