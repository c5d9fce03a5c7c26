use notekeep::http;
use notekeep::setup::arguments::{self, Launch};
use notekeep::setup::logging;
use notekeep::ui::{self, Cli};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let setup = arguments::handle_args();
    logging::setup_log(setup.log_level);

    match setup.launch {
        Launch::Menu(service) => {
            ui::run(&Cli, &service);
            Ok(())
        }
        Launch::Serve { addr, service } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(http::serve(addr, service))
        }
    }
}
