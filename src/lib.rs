#![doc = r#"
Structures and a binary codec for the Noir Music File (NMF) format.

An NMF file is a fixed-layout container of note events grouped into
chronological sections, with a configurable time quantum. [`NmfDocument`]
owns the in-memory tables, guards every invariant on mutation, and
reads/writes the byte layout.

# Example
```rust
use nmf::prelude::*;

let mut doc = NmfDocument::new();
doc.sect(96).unwrap();
doc.append(
    &NotePatch::new()
        .time(96)
        .duration(48)
        .pitch(7)
        .articulation(0)
        .section(1)
        .layer(1),
)
.unwrap();

let bytes = doc.serialize().unwrap();
let parsed = NmfDocument::from_bytes(&bytes).unwrap();

assert_eq!(parsed, doc);
assert_eq!(parsed.get(0).unwrap().pitch(), 7);
```

# Features
- `std` (default): `std::error::Error` support for the error types.
- `serde`: `Serialize`/`Deserialize` for the value types.
"#]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod constants;

mod error;
pub use error::*;

pub mod file;
pub use file::*;

mod note;
pub use note::*;

pub mod reader;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        constants::*,
        error::*,
        file::{Basis, NmfDocument, NmfHeader},
        note::*,
        reader::{ReadResult, ReaderError, ReaderErrorKind},
    };
}
