use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        roomdb::{NewRoom, RoomExt, RoomUpdate},
    },
    models::roommodel::Room,
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct RoomService<S = DBClient> {
    store: Arc<S>,
}

impl<S> RoomService<S>
where
    S: RoomExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>, ServiceError> {
        Ok(self.store.get_rooms().await?)
    }

    pub async fn get_room(&self, room_id: Uuid) -> Result<Room, ServiceError> {
        self.store
            .get_room(room_id)
            .await?
            .ok_or(ServiceError::RoomNotFound(room_id))
    }

    pub async fn create_room(&self, new_room: NewRoom) -> Result<Room, ServiceError> {
        if self.store.get_room_by_name(&new_room.name).await?.is_some() {
            return Err(ServiceError::DuplicateRoomName(new_room.name));
        }

        let room = self.store.save_room(new_room).await?;
        tracing::info!("Room {} ({}) created on floor {}", room.name, room.id, room.floor);
        Ok(room)
    }

    pub async fn update_room(&self, room_id: Uuid, update: RoomUpdate) -> Result<Room, ServiceError> {
        if let Some(name) = &update.name {
            if let Some(existing) = self.store.get_room_by_name(name).await? {
                if existing.id != room_id {
                    return Err(ServiceError::DuplicateRoomName(name.to_owned()));
                }
            }
        }

        self.store
            .update_room(room_id, update)
            .await?
            .ok_or(ServiceError::RoomNotFound(room_id))
    }

    /// Tenants living in the room lose their room reference. Contracts and
    /// bills pointing at the room are kept.
    pub async fn delete_room(&self, room_id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete_room(room_id).await? {
            return Err(ServiceError::RoomNotFound(room_id));
        }

        tracing::info!("Room {} deleted", room_id);
        Ok(())
    }
}
