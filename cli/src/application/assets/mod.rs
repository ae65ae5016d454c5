//! Asset implementations — one module per node kind of the build graph.

pub mod cluster;
pub mod key_pair;
pub mod provided_file;

pub use cluster::{Cluster, STATE_FILE_NAME, TFVARS_FILE_NAME};
pub use key_pair::KeyPair;
pub use provided_file::ProvidedFile;
