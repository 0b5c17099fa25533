#[macro_use]
extern crate quickcheck_macros;

#[path = "../../src/test/quick.rs"]
mod quick;

mod ordered;

pub(crate) use quick::Op;
