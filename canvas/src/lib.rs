//! Camera and interaction engine for the threadboard canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but the core
//! is plain Rust with no browser dependency. It owns the camera that maps an
//! unbounded world onto the interactive surface, turns raw pointer, wheel and
//! keyboard input into pan, zoom and "place at world point" intents, and
//! animates the camera when a collaborator asks to focus on a point. Thread
//! storage, panels and widget rendering live in the host application, which
//! wires DOM events to the engine and reacts to the [`engine::Action`]s it
//! returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Camera, screen/world points, viewport geometry and coordinate conversions |
//! | [`zoom`] | Anchored exponential zoom |
//! | [`pan`] | Scroll- and drag-driven camera translation |
//! | [`gesture`] | Pointer/keyboard state machine and wheel classification |
//! | [`animator`] | Smooth focus animation toward a world point |
//! | [`layers`] | Content-layer transform and overlay pin placement |
//! | [`engine`] | Testable [`engine::EngineCore`] tying the pieces together |
//! | [`input`] | Input event types shared by the engine and hosts |
//! | [`config`] | Tunable engine settings |
//! | [`binding`] | Browser listener wiring and action execution |
//! | [`frame_loop`] | Cancellable `requestAnimationFrame` scheduling |
//! | [`consts`] | Shared numeric constants (zoom limits, thresholds, defaults) |

pub mod animator;
pub mod binding;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod frame_loop;
pub mod gesture;
pub mod input;
pub mod layers;
pub mod pan;
pub mod zoom;
