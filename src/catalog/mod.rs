/// Catalog layer: static tables, scanned types, and the directory scan.
///
/// Architecture:
/// ```text
///   base_dir/Example_NN/*.wav
///        │
///        ▼
///   ┌──────────┐
///   │  scanner  │  list dir → filter extensions → label → order
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ExampleGroup  │  Vec<FileEntry>, one per non-empty example
///   └───────────────┘
///        ▲
///        │
///   ┌──────────┐
///   │  tables   │  example → SNR, extensions, stem → label, label → rank
///   └──────────┘
/// ```

pub mod model;
pub mod scanner;
pub mod tables;
