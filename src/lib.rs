//! # sceneboard
//!
//! A batch tool that scans a source tree for exported UI component
//! declarations and regenerates a "storyboard": a layout file mapping each
//! component to a rectangular scene on an infinite horizontal canvas strip,
//! consumed by a visual design tool.
//!
//! The generated file is also the tool's input: on the next run the previous
//! layout is parsed back out of it and reconciled against the current set of
//! components, so hand-tuned geometry survives regeneration.
//!
//! ## Core Systems
//!
//! - **[`scan`]** — Component scanner: directory walk, export-declaration
//!   lexer, heuristic component signals, style-prop detection
//! - **[`storyboard`]** — Storyboard round trip: markup tokenizer, existing
//!   layout parser, placement reconciler, document serializer
//! - **[`geometry`]** — Scene rectangles on the storyboard strip
//! - **[`config`]** — Immutable run configuration derived from CLI flags
//! - **[`app`]** — Pipeline tying everything together

// Foundation
pub mod config;
pub mod geometry;

// Core systems
pub mod scan;
pub mod storyboard;

// Pipeline
pub mod app;
