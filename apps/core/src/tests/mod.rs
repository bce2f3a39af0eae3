//! Test Module
//!
//! ## Test Categories
//! - `brain_tests`: Intent priority order, substring semantics, response composition
//! - `confirmation_tests`: Confirmation lifecycle, eviction and event stream
//! - `actor_tests`: Assistant dispatch with mock code generation and speech
//! - `codegen_tests`: HTTP code generators against mock servers
//! - `utilities_tests`: Calculator, notes persistence and message links
//! - `bridge_tests`: HTTP routes with a mock command runner
//! - `integration_tests`: Assistant talking to a live bridge

pub mod brain_tests;
pub mod bridge_tests;
