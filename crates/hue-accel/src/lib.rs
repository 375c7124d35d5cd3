//! # hue-accel
//!
//! Optional accelerated numeric backend for the huelab hot paths.
//!
//! The engine funnels its batch conversion and distance work through the
//! [`NumericBackend`] trait. Two implementations exist:
//!
//! - [`ReferenceBackend`] - delegates to the scalar paths in
//!   `hue-convert` / `hue-metric`; always available.
//! - [`SimdBackend`] - packs four colors per `f64x4` lane for the linear
//!   algebra stages and serves CIEDE2000 trigonometry from the quantized
//!   hue table; probed at startup.
//!
//! Selection happens **once** at startup via [`select_backend`]; there is
//! no per-invocation branching on backend type. If the accelerated
//! backend fails its startup self-check, the event is logged a single
//! time and every call transparently takes the reference path - callers
//! can only tell the difference through timing.
//!
//! # Equivalence contract
//!
//! Both backends must agree within `1e-6` on every output. The SIMD
//! backend shares the reference implementation's gamma table and
//! constants, so in practice the agreement is at machine precision; the
//! self-check in [`SimdBackend::probe`] and the tests in this crate hold
//! it to the contract anyway.

#![warn(missing_docs)]

pub mod backend;
pub mod detect;
pub mod simd;

pub use backend::{NumericBackend, ReferenceBackend};
pub use detect::{detect_backends, select_backend, BackendInfo};
pub use simd::SimdBackend;
