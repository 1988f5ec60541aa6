//! Core library for the Motif Engine.
//!
//! The crate bundles a small 2D engine for procedural motifs: pixel
//! rasterization, 3×3 affine transforms, a Cartesian plane over screen
//! space, and the frame-driven animation state machines (orbit, breathing,
//! scrolling and the kolintang sequencer). Everything draws through the
//! [`DrawSink`] trait, so the host surface stays outside the crate.

pub mod anim;
pub mod config;
pub mod controls;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod kolintang;
pub mod motif;
pub mod palette;
pub mod raster;
pub mod render;
pub mod scene;
pub mod timeline;
pub mod transform;

pub use anim::{AnimationClock, BoundaryConstraint, OrbitDirection, ScrollState};
pub use config::{AnimationConfig, AppConfig, CoordinateConfig, KolintangConfig, ViewportConfig};
pub use controls::{ControlEvent, ControlState};
pub use coords::{CartesianPoint, CoordinateSystem, Margins, QuadrantCenters};
pub use error::{MotifError, Result};
pub use kolintang::{KolintangBar, KolintangSequencer, Mallet, PlayMode, SweepDirection};
pub use motif::{ClusterPattern, Motif, MotifStyle, PatternCluster};
pub use palette::{Color, Palette};
pub use raster::PixelPoint;
pub use render::{DrawCommand, DrawList, DrawSink, DrawStats, RenderGraph};
pub use scene::{SceneDescriptor, SceneInstance, SceneKind};
pub use timeline::{FrameClock, IntervalTimer};
pub use transform::AffineMatrix;
