pub mod verbosity;
