#![cfg_attr(test, allow(unused_attributes))]
#![cfg_attr(all(not(test), target_arch = "arm"), no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[allow(unused_imports)]
use cortex_m_rt::entry;

#[cfg(all(target_arch = "arm", feature = "nrf51"))]
#[entry]
fn main() -> ! {
    use bootgate_lib::ports::bootloader::Nrf51Bootloader;
    let bootloader = Nrf51Bootloader::new();
    bootloader.run();
}

/// A panic in the bootloader leaves no safe way forward: the device
/// restarts and boots from scratch.
#[cfg(target_arch = "arm")]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    defmt::error!("Bootloader panicked. Resetting.");
    cortex_m::peripheral::SCB::sys_reset()
}

#[cfg(not(target_arch = "arm"))]
fn main() {}
