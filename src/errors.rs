// Other modules in this crate `use crate::errors::*;` to get the `Error`, `ErrorKind`,
// `ResultExt` and `Result` types that `error_chain!` creates.
#![allow(deprecated)]

use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions: {} rows by {} columns", rows, columns)
        }
        InvalidEndpoint(column: usize, columns: usize) {
            description("endpoint column outside of the grid")
            display("endpoint column {} is outside of a grid with {} columns", column, columns)
        }
        AlreadyCarved {
            description("grid already carved")
            display("grid already carved, build a fresh grid for a new maze")
        }
        InvalidCount(count: usize) {
            description("invalid maze count")
            display("invalid maze count: {}, at least one maze is needed", count)
        }
    }
}
