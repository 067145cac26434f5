use std::io;

use anyhow::Context;
use chrono::Local;

use poforge_app::config::AppConfig;
use poforge_app::dispatcher::Dispatcher;
use poforge_core::SessionId;
use poforge_purchasing::OrderSession;

fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let config = AppConfig::load(&cwd)?;

    poforge_observability::init(config.log_format);

    let session = OrderSession::with_suppliers(
        SessionId::new(),
        Local::now().date_naive(),
        config.supplier_directory(),
    );
    tracing::info!(
        session_id = %session.id_typed(),
        output_dir = %config.output_dir.display(),
        suppliers = session.suppliers().len(),
        "session started"
    );

    let mut dispatcher = Dispatcher::new(session, &config.output_dir, &config.default_location);

    let stdin = io::stdin();
    let stdout = io::stdout();
    poforge_app::run(stdin.lock(), stdout.lock(), &mut dispatcher)
}
