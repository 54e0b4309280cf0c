use clap::{Parser, Subcommand};
use serde_json::Number;

use item_stack::api::ItemPayload;
use item_stack::client::{ApiReply, ItemClient};

#[derive(Parser)]
#[command(name = "item-cli")]
#[command(about = "Command-line client for the item API", long_about = None)]
struct Cli {
    /// API root, or the gateway when it relays /items.
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all items
    List {
        /// Ask the server for a canned error (server-error, bad-gateway,
        /// service-unavailable, unauthorized, forbidden, teapot)
        #[arg(long)]
        simulate: Option<String>,
    },
    /// Create an item
    Create {
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },
    /// Replace an item's name and quantity
    Update {
        id: u64,
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },
    /// Delete an item
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ItemClient::new(&cli.url);

    let reply = match cli.command {
        Commands::List { simulate } => client.list(simulate.as_deref()).await?,
        Commands::Create { name, quantity } => {
            client.create(&payload(name, quantity)?).await?
        }
        Commands::Update { id, name, quantity } => {
            client.update(id, &payload(name, quantity)?).await?
        }
        Commands::Delete { id } => client.delete(id).await?,
    };

    print_reply(&reply)?;
    Ok(())
}

fn payload(name: String, quantity: f64) -> Result<ItemPayload, Box<dyn std::error::Error>> {
    // Whole numbers go out as JSON integers.
    let quantity = if quantity.fract() == 0.0 && quantity.abs() < 9.0e15 {
        Number::from(quantity as i64)
    } else {
        Number::from_f64(quantity).ok_or("quantity must be finite")?
    };
    Ok(ItemPayload { name, quantity })
}

fn print_reply(reply: &ApiReply) -> Result<(), Box<dyn std::error::Error>> {
    if reply.is_success() {
        println!("HTTP {}", reply.status);
    } else {
        eprintln!("HTTP {}: {}", reply.status, reply.error_message().unwrap_or("error"));
    }
    println!("{}", serde_json::to_string_pretty(&reply.body)?);
    Ok(())
}
