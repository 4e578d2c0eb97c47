pub mod materialize;
