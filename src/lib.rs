// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the command-line flow.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the WE self-service
//   backend (login plus the per-customer usage, remaining-days and
//   loyalty-points fetches) and error classification.
// - `ui`: Maps the typed API results to label/value rows and renders
//   them as terminal tables.
//
// Keeping this separation makes it easy to test the API logic against a
// local stub server or to replace the presentation layer later.
pub mod api;
pub mod ui;
