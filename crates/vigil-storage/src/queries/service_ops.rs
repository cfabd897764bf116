//! Service catalog rows.

use rusqlite::{params, Connection};

use vigil_core::errors::VigilResult;
use vigil_core::models::Service;

use crate::{enum_to_str, to_storage_err};

/// Insert or refresh one service row, keyed by service id.
pub fn upsert_service(conn: &Connection, service: &Service) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO services (
            id, name, project_id, status, last_deploy, health_url,
            cpu_percent, memory_mb, uptime_percent, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            project_id = excluded.project_id,
            status = excluded.status,
            last_deploy = excluded.last_deploy,
            health_url = excluded.health_url,
            cpu_percent = excluded.cpu_percent,
            memory_mb = excluded.memory_mb,
            uptime_percent = excluded.uptime_percent,
            updated_at = excluded.updated_at",
        params![
            service.id,
            service.name,
            service.project_id,
            enum_to_str(&service.status),
            service.last_deploy.map(|t| t.to_rfc3339()),
            service.health_url,
            service.cpu_percent,
            service.memory_mb,
            service.uptime_percent,
            service.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
