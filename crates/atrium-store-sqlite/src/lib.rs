//! SQLite backend for atrium.
//!
//! Membership and applicants are child tables of `groups`, so
//! concurrent applications are plain unique-constrained inserts and
//! acceptance runs in a transaction that enforces the capacity
//! invariant.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use atrium_storage::{
    Applicant, ApplicantDecision, ApplicantId, ApplicantParams, ApplicationStatus,
    CreateGroupParams, CreateMessageParams, CreateUserParams, Group, GroupId, MessageId, Store,
    StoreError, User, UserId, UserRole,
};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// `~/.atrium/store.db` (creates dir with 0700 perms on unix)
    pub async fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::home_dir()
            .ok_or_else(|| StoreError::Backend("no home dir".into()))?
            .join(".atrium");
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let path = dir.join("store.db");
        let url = format!("sqlite://{}", path.to_string_lossy());
        Self::open(&url).await
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { pool })
    }
}

fn map_sqlx(e: sqlx::Error) -> StoreError {
    let s = e.to_string();
    if s.contains("UNIQUE") {
        StoreError::AlreadyExists
    } else {
        StoreError::Backend(s)
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, StoreError> {
    Uuid::try_parse(s).map_err(|e| StoreError::Backend(e.to_string()))
}

fn parse_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

type GroupRow = (String, String, String, String, String, String, i64);
type ApplicantRow = (String, String, String, String, String, String, String, i64);

fn applicant_from_row(row: ApplicantRow) -> Result<Applicant, StoreError> {
    let (id, _group_id, name, email, phone, resume, status, applied_at) = row;
    Ok(Applicant {
        id: ApplicantId(parse_uuid(&id)?),
        name,
        email,
        phone,
        resume,
        status: ApplicationStatus::from_str(&status).map_err(StoreError::Backend)?,
        applied_at: parse_timestamp(applied_at),
    })
}

impl SqliteStore {
    fn group_from_parts(
        row: GroupRow,
        members: Vec<String>,
        applicants: Vec<Applicant>,
    ) -> Result<Group, StoreError> {
        let (id, title, created_date, creator, description, avatar, member_limit) = row;
        Ok(Group {
            id: GroupId(parse_uuid(&id)?),
            title,
            created_date,
            creator,
            description,
            avatar,
            member_limit,
            members,
            applicants,
        })
    }

    async fn load_members(&self, group_id: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT member_name FROM group_members WHERE group_id=? ORDER BY position",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(rows.into_iter().map(|(m,)| m).collect())
    }

    async fn load_applicants(&self, group_id: &str) -> Result<Vec<Applicant>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicantRow>(
            "SELECT id, group_id, name, email, phone, resume, status, applied_at
               FROM group_applicants WHERE group_id=? ORDER BY rowid",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(applicant_from_row).collect()
    }

    async fn fetch_group_row(&self, id: &GroupId) -> Result<GroupRow, StoreError> {
        sqlx::query_as::<_, GroupRow>(
            "SELECT id, title, created_date, creator, description, avatar, member_limit
               FROM groups WHERE id=?",
        )
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(StoreError::NotFound)
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // ───────────────────────────── Groups ─────────────────────────────

    async fn create_group(&self, params: &CreateGroupParams) -> Result<GroupId, StoreError> {
        let group_id = Uuid::now_v7();
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO groups(id, title, created_date, creator, description, avatar,
                                member_limit, created_at)
             VALUES(?,?,?,?,?,?,?,?)",
        )
        .bind(group_id.to_string())
        .bind(&params.title)
        .bind(&params.created_date)
        .bind(&params.creator)
        .bind(&params.description)
        .bind(&params.avatar)
        .bind(params.member_limit)
        .bind(Utc::now().timestamp())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for (position, member) in params.members.iter().enumerate() {
            sqlx::query("INSERT INTO group_members(group_id, member_name, position) VALUES(?,?,?)")
                .bind(group_id.to_string())
                .bind(member)
                .bind(position as i64)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(GroupId(group_id))
    }

    async fn get_group(&self, group_id: &GroupId) -> Result<Group, StoreError> {
        let row = self.fetch_group_row(group_id).await?;
        let id = row.0.clone();
        let members = self.load_members(&id).await?;
        let applicants = self.load_applicants(&id).await?;
        Self::group_from_parts(row, members, applicants)
    }

    async fn get_group_by_title(&self, title: &str) -> Result<Group, StoreError> {
        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, title, created_date, creator, description, avatar, member_limit
               FROM groups WHERE title=?",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or(StoreError::NotFound)?;

        let id = row.0.clone();
        let members = self.load_members(&id).await?;
        let applicants = self.load_applicants(&id).await?;
        Self::group_from_parts(row, members, applicants)
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        let group_rows = sqlx::query_as::<_, GroupRow>(
            "SELECT id, title, created_date, creator, description, avatar, member_limit
               FROM groups ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let member_rows = sqlx::query_as::<_, (String, String)>(
            "SELECT group_id, member_name FROM group_members ORDER BY group_id, position",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let applicant_rows = sqlx::query_as::<_, ApplicantRow>(
            "SELECT id, group_id, name, email, phone, resume, status, applied_at
               FROM group_applicants ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut members_by_group: HashMap<String, Vec<String>> = HashMap::new();
        for (group_id, member) in member_rows {
            members_by_group.entry(group_id).or_default().push(member);
        }

        let mut applicants_by_group: HashMap<String, Vec<Applicant>> = HashMap::new();
        for row in applicant_rows {
            let group_id = row.1.clone();
            applicants_by_group
                .entry(group_id)
                .or_default()
                .push(applicant_from_row(row)?);
        }

        let mut out = Vec::with_capacity(group_rows.len());
        for row in group_rows {
            let id = row.0.clone();
            out.push(Self::group_from_parts(
                row,
                members_by_group.remove(&id).unwrap_or_default(),
                applicants_by_group.remove(&id).unwrap_or_default(),
            )?);
        }
        Ok(out)
    }

    async fn update_group_description(
        &self,
        group_id: &GroupId,
        description: &str,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE groups SET description=? WHERE id=?")
            .bind(description)
            .bind(group_id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_group_by_title(&self, title: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM groups WHERE title=?")
            .bind(title)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected())
    }

    // ───────────────────────────── Applications ─────────────────────────────

    async fn add_applicant(
        &self,
        group_id: &GroupId,
        params: &ApplicantParams,
    ) -> Result<ApplicantId, StoreError> {
        // Confirm the group exists so a missing group surfaces as
        // NotFound rather than a foreign-key error.
        self.fetch_group_row(group_id).await?;

        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO group_applicants(id, group_id, name, email, phone, resume,
                                          status, applied_at)
             VALUES(?,?,?,?,?,?,'pending',?)",
        )
        .bind(id.to_string())
        .bind(group_id.0.to_string())
        .bind(&params.name)
        .bind(&params.email)
        .bind(&params.phone)
        .bind(&params.resume)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(ApplicantId(id))
    }

    async fn decide_applicant(
        &self,
        group_id: &GroupId,
        email: &str,
        decision: ApplicantDecision,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let applicant = sqlx::query_as::<_, (String, String)>(
            "SELECT name, status FROM group_applicants WHERE group_id=? AND email=?",
        )
        .bind(group_id.0.to_string())
        .bind(email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let (name, status) = applicant.ok_or(StoreError::NotFound)?;
        if status != "pending" {
            return Err(StoreError::Conflict);
        }

        match decision {
            ApplicantDecision::Accept => {
                let (member_count,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM group_members WHERE group_id=?")
                        .bind(group_id.0.to_string())
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(map_sqlx)?;

                let (member_limit,): (i64,) =
                    sqlx::query_as("SELECT member_limit FROM groups WHERE id=?")
                        .bind(group_id.0.to_string())
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(map_sqlx)?;

                // The capacity invariant is enforced here, at the
                // pending → accepted transition.
                if member_count >= member_limit {
                    return Err(StoreError::Conflict);
                }

                sqlx::query(
                    "INSERT INTO group_members(group_id, member_name, position)
                     VALUES(?,?,
                            (SELECT COALESCE(MAX(position)+1, 0)
                               FROM group_members WHERE group_id=?))",
                )
                .bind(group_id.0.to_string())
                .bind(&name)
                .bind(group_id.0.to_string())
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;

                sqlx::query(
                    "UPDATE group_applicants SET status='accepted' WHERE group_id=? AND email=?",
                )
                .bind(group_id.0.to_string())
                .bind(email)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            }
            ApplicantDecision::Reject => {
                sqlx::query(
                    "UPDATE group_applicants SET status='rejected' WHERE group_id=? AND email=?",
                )
                .bind(group_id.0.to_string())
                .bind(email)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            }
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn count_members(&self, group_id: &GroupId) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM group_members WHERE group_id=?")
                .bind(group_id.0.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;
        Ok(count)
    }

    // ───────────────────────────── Users ─────────────────────────────

    async fn create_user(&self, params: &CreateUserParams) -> Result<UserId, StoreError> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO users(id, name, email, password_hash, role) VALUES(?,?,?,?,?)")
            .bind(id.to_string())
            .bind(&params.name)
            .bind(&params.email)
            .bind(&params.password_hash)
            .bind(params.role.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(UserId(id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, (String, String, String, String, String)>(
            "SELECT id, name, email, password_hash, role FROM users WHERE email=?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            None => Err(StoreError::NotFound),
            Some((id, name, email, password_hash, role)) => Ok(User {
                id: UserId(parse_uuid(&id)?),
                name,
                email,
                password_hash,
                role: UserRole::from_str(&role).map_err(StoreError::Backend)?,
            }),
        }
    }

    // ───────────────────────────── Messages ─────────────────────────────

    async fn create_message(&self, params: &CreateMessageParams) -> Result<MessageId, StoreError> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO messages(id, name, email, message, timestamp) VALUES(?,?,?,?,?)")
            .bind(id.to_string())
            .bind(&params.name)
            .bind(&params.email)
            .bind(&params.message)
            .bind(&params.timestamp)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(MessageId(id))
    }
}
