//! Driver implementations for all supported platforms. They offer
//! a safe API, and are
//! [typestate](https://rust-embedded.github.io/book/static-guarantees/typestate-programming.html)
//! based whenever possible.

pub mod nrf51 {
    pub mod delay;
    pub mod factory;
    pub mod flash;
    pub mod gpio;
    pub mod power;
    pub mod vendor;
}
