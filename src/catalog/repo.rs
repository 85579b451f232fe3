use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{
    dto::{CareerInput, CommunityInput, ProfessionalInput, SkillInput},
    repo_types::{
        Career, CareerRow, CareerSkillRow, Community, CommunityHit, Professional, Skill, SkillRef,
    },
};

/// Page size of the public community directory.
pub const COMMUNITY_DIRECTORY_LIMIT: i64 = 24;

// ---- Skills ----

pub async fn list_skills(db: &PgPool) -> sqlx::Result<Vec<Skill>> {
    sqlx::query_as::<_, Skill>(
        "SELECT id, name AS skill_name, category FROM skills ORDER BY name ASC",
    )
    .fetch_all(db)
    .await
}

pub async fn insert_skill(db: &PgPool, input: &SkillInput) -> sqlx::Result<Skill> {
    sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (name, category)
        VALUES ($1, $2)
        RETURNING id, name AS skill_name, category
        "#,
    )
    .bind(&input.skill_name)
    .bind(&input.category)
    .fetch_one(db)
    .await
}

pub async fn update_skill(db: &PgPool, id: Uuid, input: &SkillInput) -> sqlx::Result<Option<Skill>> {
    sqlx::query_as::<_, Skill>(
        r#"
        UPDATE skills SET name = $2, category = $3
         WHERE id = $1
        RETURNING id, name AS skill_name, category
        "#,
    )
    .bind(id)
    .bind(&input.skill_name)
    .bind(&input.category)
    .fetch_optional(db)
    .await
}

// ---- Careers ----

const CAREER_COLUMNS: &str = "id, name AS career_name, description, demand_level, \
     average_salary::float8 AS average_salary";

fn attach_skills(rows: Vec<CareerRow>, links: Vec<CareerSkillRow>) -> Vec<Career> {
    let mut by_career: HashMap<Uuid, Vec<SkillRef>> = HashMap::new();
    for link in links {
        by_career.entry(link.career_id).or_default().push(SkillRef {
            id: link.skill_id,
            skill_name: link.skill_name,
        });
    }
    rows.into_iter()
        .map(|r| Career {
            skills: by_career.remove(&r.id).unwrap_or_default(),
            id: r.id,
            career_name: r.career_name,
            description: r.description,
            demand_level: r.demand_level,
            average_salary: r.average_salary,
        })
        .collect()
}

async fn skill_links(db: &PgPool, career_ids: &[Uuid]) -> sqlx::Result<Vec<CareerSkillRow>> {
    sqlx::query_as::<_, CareerSkillRow>(
        r#"
        SELECT cs.career_id, s.id AS skill_id, s.name AS skill_name
          FROM career_skills cs
          JOIN skills s ON s.id = cs.skill_id
         WHERE cs.career_id = ANY($1)
         ORDER BY s.name ASC
        "#,
    )
    .bind(career_ids)
    .fetch_all(db)
    .await
}

pub async fn list_careers(db: &PgPool) -> sqlx::Result<Vec<Career>> {
    let rows = sqlx::query_as::<_, CareerRow>(&format!(
        "SELECT {CAREER_COLUMNS} FROM careers ORDER BY created_at ASC, id ASC"
    ))
    .fetch_all(db)
    .await?;
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let links = skill_links(db, &ids).await?;
    Ok(attach_skills(rows, links))
}

pub async fn get_career(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Career>> {
    let Some(row) = sqlx::query_as::<_, CareerRow>(&format!(
        "SELECT {CAREER_COLUMNS} FROM careers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    else {
        return Ok(None);
    };
    let links = skill_links(db, &[id]).await?;
    Ok(attach_skills(vec![row], links).pop())
}

async fn replace_career_skills(
    tx: &mut Transaction<'_, Postgres>,
    career_id: Uuid,
    skill_ids: &[Uuid],
) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM career_skills WHERE career_id = $1")
        .bind(career_id)
        .execute(&mut **tx)
        .await?;
    if !skill_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO career_skills (career_id, skill_id)
            SELECT $1, UNNEST($2::uuid[])
            "#,
        )
        .bind(career_id)
        .bind(skill_ids)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn insert_career(db: &PgPool, input: &CareerInput) -> sqlx::Result<Uuid> {
    let mut tx = db.begin().await?;
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO careers (name, description, demand_level, average_salary)
        VALUES ($1, $2, $3, $4::numeric(12, 2))
        RETURNING id
        "#,
    )
    .bind(&input.career_name)
    .bind(&input.description)
    .bind(&input.demand_level)
    .bind(input.average_salary)
    .fetch_one(&mut *tx)
    .await?;
    if let Some(skill_ids) = &input.skill_ids {
        replace_career_skills(&mut tx, id, skill_ids).await?;
    }
    tx.commit().await?;
    Ok(id)
}

/// Returns `false` when no career has that id.
pub async fn update_career(db: &PgPool, id: Uuid, input: &CareerInput) -> sqlx::Result<bool> {
    let mut tx = db.begin().await?;
    let updated = sqlx::query(
        r#"
        UPDATE careers
           SET name = $2, description = $3, demand_level = $4,
               average_salary = $5::numeric(12, 2)
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&input.career_name)
    .bind(&input.description)
    .bind(&input.demand_level)
    .bind(input.average_salary)
    .execute(&mut *tx)
    .await?
    .rows_affected();
    if updated == 0 {
        return Ok(false);
    }
    if let Some(skill_ids) = &input.skill_ids {
        replace_career_skills(&mut tx, id, skill_ids).await?;
    }
    tx.commit().await?;
    Ok(true)
}

// ---- Professionals ----

const PROFESSIONAL_SELECT: &str = r#"
    SELECT p.id, p.first_name, p.last_name, p.email, p.linkedin_id, p.career_id,
           c.name AS career_name
      FROM professionals p
      LEFT JOIN careers c ON c.id = p.career_id
"#;

pub async fn list_professionals(db: &PgPool) -> sqlx::Result<Vec<Professional>> {
    sqlx::query_as::<_, Professional>(&format!(
        "{PROFESSIONAL_SELECT} ORDER BY p.last_name ASC, p.first_name ASC"
    ))
    .fetch_all(db)
    .await
}

pub async fn get_professional(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Professional>> {
    sqlx::query_as::<_, Professional>(&format!("{PROFESSIONAL_SELECT} WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_professional(db: &PgPool, input: &ProfessionalInput) -> sqlx::Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO professionals (first_name, last_name, email, linkedin_id, career_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.email)
    .bind(input.linkedin_id.as_deref())
    .bind(input.career_id)
    .fetch_one(db)
    .await
}

pub async fn update_professional(
    db: &PgPool,
    id: Uuid,
    input: &ProfessionalInput,
) -> sqlx::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE professionals
           SET first_name = $2, last_name = $3, email = $4, linkedin_id = $5, career_id = $6
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.email)
    .bind(input.linkedin_id.as_deref())
    .bind(input.career_id)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

// ---- Communities ----

const COMMUNITY_SELECT: &str = r#"
    SELECT m.id, m.name AS community_name, m.description, m.career_id,
           c.name AS career_name, m.link AS community_link
      FROM communities m
      LEFT JOIN careers c ON c.id = m.career_id
"#;

pub async fn list_communities(db: &PgPool, limit: Option<i64>) -> sqlx::Result<Vec<Community>> {
    sqlx::query_as::<_, Community>(&format!(
        "{COMMUNITY_SELECT} ORDER BY m.name ASC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn get_community(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Community>> {
    sqlx::query_as::<_, Community>(&format!("{COMMUNITY_SELECT} WHERE m.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// `%`, `_` and `\` in user input match literally.
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

pub async fn search_communities(db: &PgPool, query: &str) -> sqlx::Result<Vec<CommunityHit>> {
    sqlx::query_as::<_, CommunityHit>(
        r#"
        SELECT name AS community_name, description, link AS community_link
          FROM communities
         WHERE name ILIKE $1 ESCAPE '\'
            OR description ILIKE $1 ESCAPE '\'
         ORDER BY name ASC
        "#,
    )
    .bind(like_pattern(query))
    .fetch_all(db)
    .await
}

pub async fn insert_community(db: &PgPool, input: &CommunityInput) -> sqlx::Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO communities (name, description, career_id, link)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&input.community_name)
    .bind(input.description.as_deref())
    .bind(input.career_id)
    .bind(input.community_link.as_deref())
    .fetch_one(db)
    .await
}

pub async fn update_community(db: &PgPool, id: Uuid, input: &CommunityInput) -> sqlx::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE communities
           SET name = $2, description = $3, career_id = $4, link = $5
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&input.community_name)
    .bind(input.description.as_deref())
    .bind(input.career_id)
    .bind(input.community_link.as_deref())
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

// ---- Shared ----

/// Catalog tables that admins may delete rows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Skills,
    Careers,
    Professionals,
    Communities,
}

impl CatalogTable {
    fn name(self) -> &'static str {
        match self {
            CatalogTable::Skills => "skills",
            CatalogTable::Careers => "careers",
            CatalogTable::Professionals => "professionals",
            CatalogTable::Communities => "communities",
        }
    }
}

pub async fn delete_row(db: &PgPool, table: CatalogTable, id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table.name()))
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
