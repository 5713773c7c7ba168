use std::process;

use clap::Parser;
use log::error;

use grocery_list::client::ListClient;
use grocery_list::config::{self, CliArgs, CliCommand, ExecutionContext};
use grocery_list::error::ClientError;

async fn run(args: CliArgs) -> Result<(), ClientError> {
    let base_url = config::resolve_base_url(ExecutionContext::current(), args.base_url.as_deref());
    let client = ListClient::new(base_url);

    let response = match args.command {
        CliCommand::List { raw: true } => {
            let page = client.load().await?;
            println!("{:#}", page.list);
            return Ok(());
        }
        CliCommand::List { raw: false } => {
            let list = client.fetch_list().await?;
            println!("{}", list.name);
            for item in &list.items {
                let mark = if item.checked { 'x' } else { ' ' };
                println!("[{}] {}  ({})", mark, item.name, item.id);
            }
            return Ok(());
        }
        CliCommand::Add { name } => client.add_item(&name).await?,
        CliCommand::Remove { id } => client.remove_item(&id).await?,
        CliCommand::Check { id, unchecked } => client.check_item(&id, !unchecked).await?,
    };
    println!("{}", response.status());
    Ok(())
}

#[actix_web::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    if let Err(e) = run(CliArgs::parse()).await {
        error!("{}", e);
        process::exit(1);
    }
}
