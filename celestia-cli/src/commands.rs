use celestia_client::Client;
use celestia_protocol::model::celestial_body::{
    CelestialBodyFields,
    CelestialBodyId,
};
use chrono::Utc;
use color_eyre::eyre::Error;

use crate::util::{
    format_body,
    format_uptime,
};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Show server version and uptime.
    Status,

    /// List all celestial bodies.
    List {
        /// Print the raw JSON instead of one line per body.
        #[arg(long)]
        json: bool,
    },

    /// Create a celestial body.
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Replace every field of an existing celestial body.
    ///
    /// Fields that are not given are cleared.
    Update {
        #[arg(long)]
        id: i32,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a celestial body.
    Delete {
        #[arg(long)]
        id: i32,
    },
}

#[derive(Debug, clap::Args)]
pub struct FieldArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    body_type: Option<String>,

    #[arg(long)]
    mean_radius_km: Option<f64>,

    #[arg(long)]
    mass_kg: Option<f64>,

    #[arg(long)]
    distance_from_sun_km: Option<f64>,
}

impl From<FieldArgs> for CelestialBodyFields {
    fn from(args: FieldArgs) -> Self {
        CelestialBodyFields {
            name: args.name,
            body_type: args.body_type,
            mean_radius_km: args.mean_radius_km,
            mass_kg: args.mass_kg,
            distance_from_sun_km: args.distance_from_sun_km,
        }
    }
}

impl Command {
    pub async fn run(self, client: &Client) -> Result<(), Error> {
        match self {
            Self::Status => {
                let status = client.status().await?;
                println!("Server version: {}", status.server_version);
                let uptime = Utc::now() - status.up_since;
                println!(
                    "Uptime: {} (since {})",
                    format_uptime(uptime),
                    status.up_since
                );
            }
            Self::List { json } => {
                let bodies = client.list().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&bodies)?);
                }
                else {
                    for body in &bodies {
                        println!("{}", format_body(body));
                    }
                }
            }
            Self::Create { fields } => {
                let message = client.create(&fields.into()).await?;
                println!("{}", message.message);
            }
            Self::Update { id, fields } => {
                let message = client.update(CelestialBodyId(id), fields.into()).await?;
                println!("{}", message.message);
            }
            Self::Delete { id } => {
                let message = client.delete(CelestialBodyId(id)).await?;
                println!("{}", message.message);
            }
        }

        Ok(())
    }
}
