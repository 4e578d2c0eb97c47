pub mod materializer;
