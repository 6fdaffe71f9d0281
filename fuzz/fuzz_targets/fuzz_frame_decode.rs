#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed frames must be rejected, never panic
    let _ = wordgrid::cluster::protocol::decode(data);
});
