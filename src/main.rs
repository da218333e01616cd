//! CLI entry point: boots a [`Kernel`], registers services in the fixed
//! order the core mandates, and drives the main loop until shutdown.

use stratum_core::config::Config;
use stratum_core::external::{NullRenderer, NullResourceManager, NullWindowManager};
use stratum_core::Kernel;

fn main() {
    env_logger::init();

    let config = Config::default();
    let mut kernel = Kernel::new(&config);

    kernel
        .register(true, |_| NullWindowManager::new())
        .register(false, |_| NullRenderer)
        .register(false, |_| NullResourceManager);

    let exit_code = kernel.run::<NullWindowManager>();
    std::process::exit(exit_code);
}
