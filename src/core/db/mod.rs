mod accessory;
mod item;
mod project;
mod settings;
mod state;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, Row, Sqlite};
use state::WorkspaceState;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::core::calc::{
    AccessoryDef, AccessorySelection, ItemData, LineItem, Material, PricingSettings, ProjectTotals,
    RawSettings, compute_project_totals,
};

pub use accessory::{AccessoryCatalogRepository, AccessoryUpdate, NewAccessory, SelectionRepository};
pub use item::{ItemRepository, ItemUpdate, NewItem};
pub use project::{
    BoundProjectRepository, NewProject, Project, ProjectRepository, ProjectStatus, ProjectUpdate,
    next_version,
};
pub use settings::{CompanyInfo, SettingsRepository, SettingsUpdate, WorkspaceSettings};

const META_DOOR_PRICE: &str = "door_price";
const META_SKIRTING_PRICE: &str = "skirting_price_per_meter";
const META_NEXT_PROJECT_NUMBER: &str = "next_project_number";
const COMPANY_KEYS: [&str; 6] = [
    "company_name",
    "company_address",
    "company_phone",
    "company_email",
    "company_instagram",
    "company_logo",
];

/// The first quote number handed out by a fresh workspace.
pub const FIRST_PROJECT_NUMBER: i64 = 2620;

/// A workspace: one SQLite file holding settings, the accessory catalog
/// and every project with its lines and selections.
#[derive(Debug)]
pub struct WorkspaceDb {
    state: Arc<WorkspaceState>,
}

impl WorkspaceDb {
    pub async fn new<P: AsRef<std::path::Path>>(workspace_file: P) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(WorkspaceState::new(workspace_file).await?),
        })
    }
}

/// Repository bound to a single project.
#[derive(Debug)]
pub struct ProjectStore {
    state: Arc<WorkspaceState>,
    project_id: i64,
}

async fn metadata_get<'e, E>(executor: E, key: &str) -> anyhow::Result<Option<String>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT value FROM workspace_metadata WHERE key = $1")
        .bind(key)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(|r| r.try_get("value")).transpose()?)
}

async fn metadata_set<'e, E>(executor: E, key: &str, value: &str) -> anyhow::Result<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO workspace_metadata (key, value) VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value"#,
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;
    Ok(())
}

fn parse_timestamp(raw: &str) -> anyhow::Result<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).with_context(|| format!("Invalid timestamp {:?}", raw))
}

fn now_rfc3339() -> anyhow::Result<String> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

fn project_from_row(row: &SqliteRow) -> anyhow::Result<Project> {
    let version: String = row.try_get("current_version")?;
    let status = ProjectStatus::try_from(row.try_get::<i64, _>("status")?)?;
    Ok(Project {
        id: row.try_get("id")?,
        project_number: row.try_get("project_number")?,
        name: row.try_get("name")?,
        customer_name: row.try_get("customer_name")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        offer_date: parse_timestamp(&row.try_get::<String, _>("offer_date")?)?,
        current_version: version.chars().next().unwrap_or('A'),
        status,
        _guard: (),
    })
}

fn item_from_row(row: &SqliteRow) -> anyhow::Result<LineItem> {
    let data_text: String = row.try_get("data")?;
    let data: ItemData = serde_json::from_str(&data_text)
        .with_context(|| format!("Corrupt item data: {}", data_text))?;
    Ok(LineItem {
        id: row.try_get("id")?,
        item_type: row.try_get("item_type")?,
        name: row.try_get("name")?,
        data,
    })
}

fn accessory_from_row(row: &SqliteRow) -> anyhow::Result<AccessoryDef> {
    Ok(AccessoryDef {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        unit_price: row.try_get("unit_price")?,
        is_active: row.try_get::<i64, _>("is_active")? != 0,
    })
}

impl SettingsRepository for WorkspaceDb {
    async fn get_settings(&self) -> anyhow::Result<WorkspaceSettings> {
        let mut conn = self.state.conn().await?;

        let mut material_prices: HashMap<String, f64> = HashMap::new();
        for row in sqlx::query("SELECT material, unit_price FROM material_price")
            .fetch_all(&mut *conn)
            .await?
        {
            material_prices.insert(row.try_get("material")?, row.try_get("unit_price")?);
        }

        let mut coefficients: HashMap<String, f64> = HashMap::new();
        for row in sqlx::query("SELECT category, value FROM coefficient")
            .fetch_all(&mut *conn)
            .await?
        {
            coefficients.insert(row.try_get("category")?, row.try_get("value")?);
        }

        let accessories = sqlx::query(
            "SELECT id, name, unit_price, is_active FROM accessory ORDER BY position ASC, id ASC",
        )
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(accessory_from_row)
        .collect::<anyhow::Result<Vec<_>>>()?;

        let door_price = metadata_get(&mut *conn, META_DOOR_PRICE)
            .await?
            .map(|v| v.parse::<f64>())
            .transpose()?;
        let skirting = metadata_get(&mut *conn, META_SKIRTING_PRICE)
            .await?
            .map(|v| v.parse::<f64>())
            .transpose()?;
        let next_project_number = metadata_get(&mut *conn, META_NEXT_PROJECT_NUMBER)
            .await?
            .map(|v| v.parse::<i64>())
            .transpose()?
            .unwrap_or(FIRST_PROJECT_NUMBER);

        let mut company_values = Vec::with_capacity(COMPANY_KEYS.len());
        for key in COMPANY_KEYS {
            company_values.push(metadata_get(&mut *conn, key).await?.unwrap_or_default());
        }
        let [name, address, phone, email, instagram, logo_data_url] = company_values
            .try_into()
            .expect("one value per company key");

        let raw = RawSettings {
            material_prices: (!material_prices.is_empty()).then_some(material_prices),
            coefficients: (!coefficients.is_empty()).then_some(coefficients),
            accessories: Some(accessories),
            door_price,
            skirting_price_per_meter: skirting,
        };

        Ok(WorkspaceSettings {
            pricing: PricingSettings::resolve(&raw),
            next_project_number,
            company: CompanyInfo {
                name,
                address,
                phone,
                email,
                instagram,
                logo_data_url,
            },
        })
    }

    async fn update_settings(&self, update: SettingsUpdate) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;

        if let Some(prices) = update.material_prices {
            for material in Material::ALL {
                sqlx::query(
                    r#"INSERT INTO material_price (material, unit_price) VALUES ($1, $2)
                    ON CONFLICT (material) DO UPDATE SET unit_price = EXCLUDED.unit_price"#,
                )
                .bind(material.key())
                .bind(prices.get(material))
                .execute(&mut *conn)
                .await?;
            }
        }

        if let Some(coefficients) = update.coefficients {
            let rows = [
                ("hilton", coefficients.hilton),
                ("tv", coefficients.tv),
                ("seperator", coefficients.seperator),
                ("coffee", coefficients.coffee),
            ];
            for (category, value) in rows {
                sqlx::query(
                    r#"INSERT INTO coefficient (category, value) VALUES ($1, $2)
                    ON CONFLICT (category) DO UPDATE SET value = EXCLUDED.value"#,
                )
                .bind(category)
                .bind(value)
                .execute(&mut *conn)
                .await?;
            }
        }

        if let Some(door_price) = update.door_price {
            metadata_set(&mut *conn, META_DOOR_PRICE, &door_price.to_string()).await?;
        }
        if let Some(skirting) = update.skirting_price_per_meter {
            metadata_set(&mut *conn, META_SKIRTING_PRICE, &skirting.to_string()).await?;
        }
        if let Some(company) = update.company {
            let values = [
                company.name,
                company.address,
                company.phone,
                company.email,
                company.instagram,
                company.logo_data_url,
            ];
            for (key, value) in COMPANY_KEYS.iter().zip(values.iter()) {
                metadata_set(&mut *conn, key, value).await?;
            }
        }
        Ok(())
    }
}

impl AccessoryCatalogRepository for WorkspaceDb {
    async fn get_accessories(&self) -> anyhow::Result<Vec<AccessoryDef>> {
        let mut conn = self.state.conn().await?;
        sqlx::query(
            "SELECT id, name, unit_price, is_active FROM accessory ORDER BY position ASC, id ASC",
        )
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(accessory_from_row)
        .collect()
    }

    async fn add_accessory(&self, accessory: &NewAccessory) -> anyhow::Result<AccessoryDef> {
        let mut conn = self.state.conn().await?;
        let id = Uuid::new_v4().to_string();
        let row = sqlx::query(
            r#"INSERT INTO accessory (id, name, unit_price, is_active, position)
            VALUES ($1, $2, $3, 1, (SELECT COALESCE(MIN(position), 1) - 1 FROM accessory))
            RETURNING id, name, unit_price, is_active"#,
        )
        .bind(&id)
        .bind(&accessory.name)
        .bind(accessory.unit_price)
        .fetch_one(&mut *conn)
        .await?;
        accessory_from_row(&row)
    }

    async fn update_accessory(
        &self,
        id: &str,
        update: &AccessoryUpdate,
    ) -> anyhow::Result<AccessoryDef> {
        let mut conn = self.state.conn().await?;
        let is_active = update.is_active.map(i64::from);
        let row = sqlx::query(
            r#"UPDATE accessory SET
                name = COALESCE($1, name),
                unit_price = COALESCE($2, unit_price),
                is_active = COALESCE($3, is_active)
            WHERE id = $4
            RETURNING id, name, unit_price, is_active"#,
        )
        .bind(&update.name)
        .bind(update.unit_price)
        .bind(is_active)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        accessory_from_row(&row)
    }

    async fn delete_accessory(&self, id: &str) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        sqlx::query("DELETE FROM accessory WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

impl ProjectRepository for WorkspaceDb {
    type Store = ProjectStore;

    fn open_project(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = anyhow::Result<Self::Store>> + 'static {
        let state = self.state.clone();
        async move {
            let mut conn = state.conn().await?;
            let row = sqlx::query("SELECT id FROM project WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
            if row.is_none() {
                anyhow::bail!("Project with id {} not found", id);
            }
            Ok(ProjectStore {
                state: state.clone(),
                project_id: id,
            })
        }
    }

    async fn create_project(&self, new: NewProject) -> anyhow::Result<ProjectStore> {
        let name = new.name.trim().to_string();
        let customer_name = new.customer_name.trim().to_string();
        if name.is_empty() {
            anyhow::bail!("Project name must not be empty");
        }
        if customer_name.is_empty() {
            anyhow::bail!("Customer name must not be empty");
        }
        let phone = new
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        let address = new
            .address
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let mut conn = self.state.conn().await?;
        let mut tx = conn.begin().await?;

        let next_number = metadata_get(&mut *tx, META_NEXT_PROJECT_NUMBER)
            .await?
            .map(|v| v.parse::<i64>())
            .transpose()?
            .unwrap_or(FIRST_PROJECT_NUMBER);
        let now = now_rfc3339()?;

        let row = sqlx::query(
            r#"INSERT INTO project
            (project_number, name, customer_name, phone, address, created_at, offer_date, current_version, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'A', $8)
            RETURNING id"#,
        )
        .bind(next_number)
        .bind(&name)
        .bind(&customer_name)
        .bind(&phone)
        .bind(&address)
        .bind(&now)
        .bind(&now)
        .bind(i64::from(ProjectStatus::Offer))
        .fetch_one(&mut *tx)
        .await?;
        let id: i64 = row.try_get("id")?;

        metadata_set(
            &mut *tx,
            META_NEXT_PROJECT_NUMBER,
            &(next_number + 1).to_string(),
        )
        .await?;
        tx.commit().await?;

        Ok(ProjectStore {
            state: self.state.clone(),
            project_id: id,
        })
    }

    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        let mut conn = self.state.conn().await?;
        sqlx::query(
            r#"SELECT id, project_number, name, customer_name, phone, address,
                created_at, offer_date, current_version, status
            FROM project
            ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(project_from_row)
        .collect()
    }
}

impl BoundProjectRepository for ProjectStore {
    async fn get_project(&self) -> anyhow::Result<Project> {
        let mut conn = self.state.conn().await?;
        let row = sqlx::query(
            r#"SELECT id, project_number, name, customer_name, phone, address,
                created_at, offer_date, current_version, status
            FROM project WHERE id = $1"#,
        )
        .bind(self.project_id)
        .fetch_optional(&mut *conn)
        .await?;
        match row {
            Some(row) => project_from_row(&row),
            None => Err(anyhow::anyhow!(
                "Project with id {} not found",
                self.project_id
            )),
        }
    }

    async fn update_project(
        &self,
        project: &Project,
        update: &ProjectUpdate,
    ) -> anyhow::Result<Project> {
        let mut conn = self.state.conn().await?;
        let phone = match &update.phone {
            Some(value) => value.clone(),
            None => project.phone.clone(),
        };
        let address = match &update.address {
            Some(value) => value.clone(),
            None => project.address.clone(),
        };
        let status = update.status.map(i64::from);
        let row = sqlx::query(
            r#"UPDATE project SET
                name = COALESCE($1, name),
                customer_name = COALESCE($2, customer_name),
                phone = $3,
                address = $4,
                status = COALESCE($5, status)
            WHERE id = $6
            RETURNING id, project_number, name, customer_name, phone, address,
                created_at, offer_date, current_version, status"#,
        )
        .bind(&update.name)
        .bind(&update.customer_name)
        .bind(&phone)
        .bind(&address)
        .bind(status)
        .bind(self.project_id)
        .fetch_one(&mut *conn)
        .await?;
        project_from_row(&row)
    }

    async fn revise(&self) -> anyhow::Result<Project> {
        let project = self.get_project().await?;
        let next = next_version(project.current_version);
        let now = now_rfc3339()?;
        let mut conn = self.state.conn().await?;
        let row = sqlx::query(
            r#"UPDATE project SET
                current_version = $1,
                offer_date = $2,
                status = $3
            WHERE id = $4
            RETURNING id, project_number, name, customer_name, phone, address,
                created_at, offer_date, current_version, status"#,
        )
        .bind(next.to_string())
        .bind(&now)
        .bind(i64::from(ProjectStatus::Revised))
        .bind(self.project_id)
        .fetch_one(&mut *conn)
        .await?;
        project_from_row(&row)
    }

    async fn totals(&self, settings: &PricingSettings) -> anyhow::Result<ProjectTotals> {
        let items = self.get_items().await?;
        let selections = self.get_selections().await?;
        Ok(compute_project_totals(settings, &items, &selections))
    }

    async fn delete(self) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        sqlx::query("DELETE FROM project WHERE id = $1")
            .bind(self.project_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

impl ItemRepository for ProjectStore {
    async fn get_items(&self) -> anyhow::Result<Vec<LineItem>> {
        let mut conn = self.state.conn().await?;
        sqlx::query(
            r#"SELECT id, item_type, name, data FROM item
            WHERE project_id = $1
            ORDER BY id ASC"#,
        )
        .bind(self.project_id)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(item_from_row)
        .collect()
    }

    async fn get_item_by_id(&self, id: i64) -> anyhow::Result<Option<LineItem>> {
        let mut conn = self.state.conn().await?;
        let row = sqlx::query(
            r#"SELECT id, item_type, name, data FROM item
            WHERE project_id = $1 AND id = $2"#,
        )
        .bind(self.project_id)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        row.as_ref().map(item_from_row).transpose()
    }

    async fn add_item(&self, item: &NewItem) -> anyhow::Result<LineItem> {
        let mut conn = self.state.conn().await?;
        let data_text = serde_json::to_string(&item.data)?;
        let row = sqlx::query(
            r#"INSERT INTO item (project_id, item_type, name, data)
            VALUES ($1, $2, $3, $4)
            RETURNING id, item_type, name, data"#,
        )
        .bind(self.project_id)
        .bind(&item.item_type)
        .bind(&item.name)
        .bind(&data_text)
        .fetch_one(&mut *conn)
        .await?;
        item_from_row(&row)
    }

    async fn update_item(&self, item: &LineItem, update: &ItemUpdate) -> anyhow::Result<LineItem> {
        let mut conn = self.state.conn().await?;
        let data_text = serde_json::to_string(update.data.as_ref().unwrap_or(&item.data))?;
        let row = sqlx::query(
            r#"UPDATE item SET
                item_type = COALESCE($1, item_type),
                name = COALESCE($2, name),
                data = $3
            WHERE id = $4 AND project_id = $5
            RETURNING id, item_type, name, data"#,
        )
        .bind(&update.item_type)
        .bind(&update.name)
        .bind(&data_text)
        .bind(item.id)
        .bind(self.project_id)
        .fetch_one(&mut *conn)
        .await?;
        item_from_row(&row)
    }

    async fn delete_item(&self, item: LineItem) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        sqlx::query("DELETE FROM item WHERE id = $1 AND project_id = $2")
            .bind(item.id)
            .bind(self.project_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

impl SelectionRepository for ProjectStore {
    async fn get_selections(&self) -> anyhow::Result<Vec<AccessorySelection>> {
        let mut conn = self.state.conn().await?;
        Ok(sqlx::query(
            r#"SELECT accessory_id, quantity FROM accessory_selection
            WHERE project_id = $1
            ORDER BY accessory_id ASC"#,
        )
        .bind(self.project_id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|row| -> anyhow::Result<AccessorySelection> {
            Ok(AccessorySelection {
                accessory_id: row.try_get("accessory_id")?,
                quantity: row.try_get::<i64, _>("quantity")? as u32,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn set_accessory_quantity(
        &self,
        accessory_id: &str,
        quantity: f64,
    ) -> anyhow::Result<Option<AccessorySelection>> {
        let safe_quantity = quantity.floor().max(0.0) as i64;
        let mut conn = self.state.conn().await?;
        if safe_quantity <= 0 {
            sqlx::query(
                "DELETE FROM accessory_selection WHERE project_id = $1 AND accessory_id = $2",
            )
            .bind(self.project_id)
            .bind(accessory_id)
            .execute(&mut *conn)
            .await?;
            return Ok(None);
        }
        sqlx::query(
            r#"INSERT INTO accessory_selection (project_id, accessory_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, accessory_id) DO UPDATE SET quantity = EXCLUDED.quantity"#,
        )
        .bind(self.project_id)
        .bind(accessory_id)
        .bind(safe_quantity)
        .execute(&mut *conn)
        .await?;
        Ok(Some(AccessorySelection {
            accessory_id: accessory_id.to_string(),
            quantity: safe_quantity as u32,
        }))
    }
}
