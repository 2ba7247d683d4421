//! Job dispatch generated by `build.rs` from the markers in `src/jobs`.

include!(concat!(env!("OUT_DIR"), "/flow.rs"));
