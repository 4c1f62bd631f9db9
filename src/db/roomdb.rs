use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::roommodel::{Room, RoomStatus},
};

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub floor: i32,
    pub area_m2: Option<f64>,
    pub base_price: f64,
    pub status: RoomStatus,
    pub facilities: Vec<String>,
}

/// Partial room edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub floor: Option<i32>,
    pub area_m2: Option<f64>,
    pub base_price: Option<f64>,
    pub status: Option<RoomStatus>,
    pub facilities: Option<Vec<String>>,
}

#[async_trait]
pub trait RoomExt {
    async fn get_rooms(&self) -> Result<Vec<Room>, sqlx::Error>;

    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, sqlx::Error>;

    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>, sqlx::Error>;

    async fn save_room(&self, new_room: NewRoom) -> Result<Room, sqlx::Error>;

    async fn update_room(
        &self,
        room_id: Uuid,
        update: RoomUpdate,
    ) -> Result<Option<Room>, sqlx::Error>;

    async fn set_room_status(
        &self,
        room_id: Uuid,
        status: RoomStatus,
    ) -> Result<Option<Room>, sqlx::Error>;

    /// Deletes the room and clears the room reference of every tenant
    /// pointing at it. Contracts and bills are left alone.
    async fn delete_room(&self, room_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl RoomExt for DBClient {
    async fn get_rooms(&self) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(r#"SELECT * FROM rooms ORDER BY floor ASC, name ASC"#)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(r#"SELECT * FROM rooms WHERE id = $1"#)
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(r#"SELECT * FROM rooms WHERE name = $1"#)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    async fn save_room(&self, new_room: NewRoom) -> Result<Room, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (id, name, floor, area_m2, base_price, status, facilities, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, '{}')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_room.name)
        .bind(new_room.floor)
        .bind(new_room.area_m2)
        .bind(new_room.base_price)
        .bind(new_room.status)
        .bind(new_room.facilities)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_room(
        &self,
        room_id: Uuid,
        update: RoomUpdate,
    ) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET name = COALESCE($2, name),
                floor = COALESCE($3, floor),
                area_m2 = COALESCE($4, area_m2),
                base_price = COALESCE($5, base_price),
                status = COALESCE($6, status),
                facilities = COALESCE($7, facilities),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(update.name)
        .bind(update.floor)
        .bind(update.area_m2)
        .bind(update.base_price)
        .bind(update.status)
        .bind(update.facilities)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_room_status(
        &self,
        room_id: Uuid,
        status: RoomStatus,
    ) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_room(&self, room_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET room_id = NULL, updated_at = NOW() WHERE room_id = $1")
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
