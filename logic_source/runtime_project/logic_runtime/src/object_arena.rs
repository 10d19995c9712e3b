use logic_ids::ObjectID;

/// Scene entity as far as logic trees are concerned: a name and an identity.
/// Behaviour is attached separately through capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObject {
    pub name: String,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub struct ObjectArena {
    objects: Vec<Option<SceneObject>>,
    generations: Vec<u32>,
    free_indices: Vec<usize>,
}

impl Default for ObjectArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectArena {
    pub fn new() -> Self {
        // Index 0 is the nil sentinel, so the first real object ID is 1.
        Self {
            objects: vec![None],
            generations: vec![0],
            free_indices: Vec::new(),
        }
    }

    /// Insert an object, returns ObjectID with index and generation
    pub fn insert(&mut self, object: SceneObject) -> ObjectID {
        if let Some(index) = self.free_indices.pop() {
            self.objects[index] = Some(object);
            return ObjectID::from_parts(index as u32, self.generations[index]);
        }

        let index = self.objects.len();
        self.objects.push(Some(object));
        self.generations.push(0);
        ObjectID::from_parts(index as u32, 0)
    }

    #[inline]
    fn live_index(&self, id: ObjectID) -> Option<usize> {
        let index = id.index() as usize;
        if id.is_nil()
            || index == 0
            || index >= self.objects.len()
            || self.generations[index] != id.generation()
        {
            return None;
        }
        Some(index)
    }

    /// Get an object by ID, returns None if generation doesn't match
    pub fn get(&self, id: ObjectID) -> Option<&SceneObject> {
        self.live_index(id)
            .and_then(|index| self.objects[index].as_ref())
    }

    /// Remove an object, bumping the generation counter
    pub fn remove(&mut self, id: ObjectID) -> Option<SceneObject> {
        let index = self.live_index(id)?;
        let removed = self.objects[index].take();
        if removed.is_some() {
            self.generations[index] = self.generations[index].wrapping_add(1);
            self.free_indices.push(index);
        }
        removed
    }

    pub fn contains(&self, id: ObjectID) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectID> {
        self.iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectID, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, object)| {
                object
                    .as_ref()
                    .map(|o| (ObjectID::from_parts(index as u32, self.generations[index]), o))
            })
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.iter().filter(|o| o.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.iter().all(|o| o.is_none())
    }
}
