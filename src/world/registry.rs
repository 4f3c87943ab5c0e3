use crate::error::{MechanicsError, MechanicsResult};
use crate::world::{basic_blocks, Block, BlockId};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry that stores all block types
pub struct BlockRegistry {
    blocks: HashMap<BlockId, Arc<dyn Block>>,
    name_to_id: HashMap<String, BlockId>,
    next_id: u16,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            name_to_id: HashMap::new(),
            next_id: BlockId::GAME_BLOCK_START,
        }
    }

    /// Registry preloaded with the engine's built-in blocks
    pub fn with_basic_blocks() -> Self {
        let mut registry = Self::new();
        basic_blocks::register_all(&mut registry);
        registry
    }

    /// Register a block under its own id (built-ins and fixed-id blocks)
    pub fn register_with_id<B: Block + 'static>(&mut self, block: B) -> MechanicsResult<BlockId> {
        let id = block.get_id();
        let name = block.get_name().to_string();
        if self.blocks.contains_key(&id) || self.name_to_id.contains_key(&name) {
            return Err(MechanicsError::DuplicateBlock { name });
        }
        self.name_to_id.insert(name, id);
        self.blocks.insert(id, Arc::new(block));
        Ok(id)
    }

    /// Register a game block under the next free game id
    pub fn register<B: Block + 'static>(&mut self, name: &str, block: B) -> MechanicsResult<BlockId> {
        if self.name_to_id.contains_key(name) {
            return Err(MechanicsError::DuplicateBlock {
                name: name.to_string(),
            });
        }
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(id, Arc::new(block));
        self.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Get a block by ID
    pub fn get_block(&self, id: BlockId) -> Option<Arc<dyn Block>> {
        self.blocks.get(&id).cloned()
    }

    /// Get a block ID by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_basic_blocks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockState;

    #[test]
    fn basic_blocks_are_registered() {
        let registry = BlockRegistry::with_basic_blocks();
        assert!(registry.get_block(BlockId::AIR).is_some());
        assert!(registry.get_block(BlockId::STONE).is_some());
        assert!(registry.get_block(BlockId::PISTON).is_some());
        assert_eq!(registry.get_id("Stone"), Some(BlockId::STONE));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = BlockRegistry::with_basic_blocks();
        let err = registry.register_with_id(basic_blocks::StoneBlock);
        assert!(err.is_err());
    }

    #[test]
    fn air_has_no_collision() {
        let registry = BlockRegistry::with_basic_blocks();
        let air = registry.get_block(BlockId::AIR).unwrap();
        assert!(air.collision_shape(&BlockState::AIR).is_empty());
    }
}
