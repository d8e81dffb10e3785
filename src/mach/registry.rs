use super::Runtime;

/// Index of a runtime environment inside a [`Registry`].
pub type RuntimeId = usize;

/// Named lookup of runtime environments so that engines spawned for a
/// conditional body share the state of the engine that spawned them.
///
/// Names are not deduplicated; a lookup returns the first runtime
/// registered under the name.
#[derive(Debug, Default)]
pub struct Registry {
    sets: Vec<Runtime>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn register(&mut self, runtime: Runtime) -> RuntimeId {
        self.sets.push(runtime);
        self.sets.len() - 1
    }

    pub fn lookup(&self, name: &str) -> Option<RuntimeId> {
        self.sets.iter().position(|r| r.name() == name)
    }

    pub fn get(&self, id: RuntimeId) -> Option<&Runtime> {
        self.sets.get(id)
    }

    pub fn get_mut(&mut self, id: RuntimeId) -> Option<&mut Runtime> {
        self.sets.get_mut(id)
    }

    pub fn find(&self, name: &str) -> Option<&Runtime> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
