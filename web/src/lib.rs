use std::rc::Rc;

use clap::Parser;

pub use bridge::{GridChangeBus, GridChangeSubscriber, StateBridge};
pub use game::{BridgeProps, BridgeView};
pub use screen::Screen;
pub use service::{ServiceHandle, StateService, Subscription};

mod bridge;
mod game;
mod screen;
mod service;
#[cfg(test)]
mod testutil;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

/// Mounts the bridge onto `root`, wired to the given state service.
///
/// The host owns the root element and the service transport, and is
/// responsible for unmounting; dropping the mounted tree tears the remote
/// subscription down with it.
pub fn launch(root: web_sys::Element, service: Rc<dyn StateService>) {
    use gloo::utils::window;

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    log::debug!("App started");
    yew::Renderer::<BridgeView>::with_root_and_props(
        root,
        BridgeProps {
            service: ServiceHandle::new(service),
        },
    )
    .render();
}
