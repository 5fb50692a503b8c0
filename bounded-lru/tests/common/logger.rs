use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs an `env_logger` once per test binary. `RUST_LOG` overrides the
/// default level, e.g. `RUST_LOG=bounded_lru=debug`.
pub fn init_test_logger() {
   INIT.call_once(|| {
      let _ = Builder::new()
         .filter_level(LevelFilter::Info)
         .format_timestamp_millis()
         .parse_default_env()
         .is_test(true)
         .try_init();
   });
}
