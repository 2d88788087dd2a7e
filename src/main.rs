use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mobilya_teklif::{
    BoundProjectRepository, ItemData, ItemRepository, NewItem, NewProject, Project,
    ProjectRepository, ProjectStatus, SelectionRepository, SettingsRepository, WorkspaceDb,
    approved_revenue, to_num_str,
};

#[derive(Parser)]
#[command(name = "mobilya-teklif")]
#[command(about = "Create and price furniture workshop quotes")]
struct Cli {
    /// Path to the workspace database file (created if missing)
    #[arg(value_name = "WORKSPACE")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects with their grand totals, newest first
    List {
        /// Only show projects with this status, e.g. "Onaylandı"
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one project's offer breakdown
    Show {
        /// Project code ("2620A") or plain quote number
        code: String,

        /// Emit the computed totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approved revenue and per-status project counts
    Summary,
    /// Create a project; prints the assigned quote code
    New {
        /// Project name
        #[arg(long)]
        name: String,

        /// Customer name
        #[arg(long)]
        customer: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Advance a project's revision letter and refresh its offer date
    Revise { code: String },
    /// Add a priced line to a project
    AddItem {
        code: String,

        /// Item type, matched loosely ("Mutfak", "Kapı", "TV Ünitesi", ...)
        #[arg(long, value_name = "TYPE")]
        item_type: String,

        /// Display name; defaults to the type text
        #[arg(long)]
        name: Option<String>,

        /// Raw form fields as key=value pairs, e.g. qty=3 or shape=L
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Set an accessory quantity on a project (0 removes the selection)
    SetAccessory {
        code: String,
        accessory_id: String,
        quantity: String,
    },
}

fn parse_fields(fields: &[String]) -> anyhow::Result<ItemData> {
    let mut data = ItemData::new();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected FIELD=VALUE, got {:?}", field))?;
        data.set(key, value);
    }
    Ok(data)
}

/// Currency display in the offer style: whole currency units, thousands
/// separated with dots, e.g. "12.000 ₺".
fn currency(n: f64) -> String {
    let whole = n.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }
    format!("{} ₺", grouped)
}

fn format_date(date: time::OffsetDateTime) -> String {
    format!("{:02}.{:02}.{}", date.day(), u8::from(date.month()), date.year())
}

fn find_project<'a>(projects: &'a [Project], code: &str) -> Option<&'a Project> {
    projects
        .iter()
        .find(|p| p.code() == code || p.project_number.to_string() == code)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let db = WorkspaceDb::new(&args.workspace).await?;
    let settings = db.get_settings().await?;

    match args.command {
        Command::List { status } => {
            let filter = match status.as_deref() {
                Some(label) => Some(ProjectStatus::from_label(label).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown status {:?} (expected Teklif, Beklemede, Onaylandı or Revize)",
                        label
                    )
                })?),
                None => None,
            };
            let projects = db.get_projects().await?;
            let mut shown = 0;
            for project in &projects {
                if filter.is_some_and(|f| f != project.status) {
                    continue;
                }
                let store = db.open_project(project.id).await?;
                let totals = store.totals(&settings.pricing).await?;
                println!(
                    "{}  {} • {} • {} • {}",
                    project.code(),
                    project.name,
                    project.customer_name,
                    project.status.label(),
                    currency(totals.grand_total)
                );
                shown += 1;
            }
            if shown == 0 {
                println!("No projects.");
            }
        }
        Command::Show { code, json } => {
            let projects = db.get_projects().await?;
            let project = find_project(&projects, &code)
                .ok_or_else(|| anyhow::anyhow!("No project with code {:?}", code))?;
            let store = db.open_project(project.id).await?;
            let totals = store.totals(&settings.pricing).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
                return Ok(());
            }

            println!("=== Teklif {} ===", project.code());
            println!("{} • {}", project.name, project.customer_name);
            if let Some(phone) = &project.phone {
                println!("Tel: {}", phone);
            }
            if let Some(address) = &project.address {
                println!("Adres: {}", address);
            }
            println!(
                "Tarih: {} • Durum: {}",
                format_date(project.offer_date),
                project.status.label()
            );
            println!();
            for item in &totals.items {
                println!(
                    "  {} • {}  (faktör {:.2})  {}",
                    item.type_label,
                    item.name,
                    item.factor,
                    currency(item.price)
                );
            }
            println!();
            println!("Kalemler:    {}", currency(totals.items_total));
            println!("Aksesuarlar: {}", currency(totals.accessories_total));
            println!("Genel Toplam: {}", currency(totals.grand_total));
        }
        Command::Summary => {
            let projects = db.get_projects().await?;
            let mut approved_totals = Vec::new();
            let mut counts = [0usize; 4];
            for project in &projects {
                counts[i64::from(project.status) as usize] += 1;
                if project.status == ProjectStatus::Approved {
                    let store = db.open_project(project.id).await?;
                    let totals = store.totals(&settings.pricing).await?;
                    approved_totals.push(totals.grand_total);
                }
            }
            println!("=== Özet ===");
            for (status, count) in [
                ProjectStatus::Offer,
                ProjectStatus::Pending,
                ProjectStatus::Approved,
                ProjectStatus::Revised,
            ]
            .iter()
            .zip(counts)
            {
                println!("{}: {}", status.label(), count);
            }
            println!(
                "Onaylanan ciro: {}",
                currency(approved_revenue(approved_totals))
            );
        }
        Command::New {
            name,
            customer,
            phone,
            address,
        } => {
            let store = db
                .create_project(NewProject {
                    name,
                    customer_name: customer,
                    phone,
                    address,
                })
                .await?;
            let project = store.get_project().await?;
            println!("Created {} ({})", project.code(), project.name);
        }
        Command::Revise { code } => {
            let projects = db.get_projects().await?;
            let project = find_project(&projects, &code)
                .ok_or_else(|| anyhow::anyhow!("No project with code {:?}", code))?;
            let store = db.open_project(project.id).await?;
            let revised = store.revise().await?;
            println!(
                "Revised to {} (offer date {})",
                revised.code(),
                format_date(revised.offer_date)
            );
        }
        Command::AddItem {
            code,
            item_type,
            name,
            fields,
        } => {
            let projects = db.get_projects().await?;
            let project = find_project(&projects, &code)
                .ok_or_else(|| anyhow::anyhow!("No project with code {:?}", code))?;
            let store = db.open_project(project.id).await?;
            let item = store
                .add_item(&NewItem {
                    name: name.unwrap_or_else(|| item_type.clone()),
                    item_type,
                    data: parse_fields(&fields)?,
                })
                .await?;
            let totals = store.totals(&settings.pricing).await?;
            let computed = totals
                .items
                .iter()
                .find(|it| it.id == item.id)
                .expect("item just added is in the totals");
            println!(
                "Added {} • {}  (faktör {:.2})  {}",
                computed.type_label,
                computed.name,
                computed.factor,
                currency(computed.price)
            );
            println!("Genel Toplam: {}", currency(totals.grand_total));
        }
        Command::SetAccessory {
            code,
            accessory_id,
            quantity,
        } => {
            let projects = db.get_projects().await?;
            let project = find_project(&projects, &code)
                .ok_or_else(|| anyhow::anyhow!("No project with code {:?}", code))?;
            let store = db.open_project(project.id).await?;
            match store
                .set_accessory_quantity(&accessory_id, to_num_str(&quantity))
                .await?
            {
                Some(selection) => println!("{} x{}", selection.accessory_id, selection.quantity),
                None => println!("Removed {}", accessory_id),
            }
            let totals = store.totals(&settings.pricing).await?;
            println!("Aksesuarlar: {}", currency(totals.accessories_total));
        }
    }

    Ok(())
}
