//! Domain modules: alphabets, corpus I/O and motif discovery

pub mod io;
pub mod motif;
pub mod seq;
