//! Integration suite: the six worked scenarios, the quantified laws,
//! and the behavioral invariants from the design documents.

mod laws;
mod scenarios;
