use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::{BTreeMap, HashMap};

type Result<T> = std::result::Result<T, Error>;

/// A declared array. Every access must supply exactly `dimension` indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dimension: usize,
    cells: BTreeMap<String, Val>,
}

impl Array {
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cells(&self) -> &BTreeMap<String, Val> {
        &self.cells
    }
}

/// ## Variable memory
///
/// Names arriving here are already qualified with their namespace.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<String, Val>,
    arrays: HashMap<String, Array>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn fetch(&self, var_name: &str) -> Result<Val> {
        match self.vars.get(var_name) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(VariableNotDeclared; var_name)),
        }
    }

    pub fn store(&mut self, var_name: &str, value: Val) -> Result<()> {
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                if self.vars.len() > u16::max_value() as usize {
                    return Err(error!(OutOfMemory; "TOO MANY VARIABLES"));
                }
                self.vars.insert(var_name.to_string(), value);
            }
        };
        Ok(())
    }

    pub fn remove(&mut self, var_name: &str) -> Option<Val> {
        self.vars.remove(var_name)
    }

    pub fn contains_array(&self, var_name: &str) -> bool {
        self.arrays.contains_key(var_name)
    }

    pub fn array(&self, var_name: &str) -> Result<&Array> {
        match self.arrays.get(var_name) {
            Some(array) => Ok(array),
            None => Err(error!(ArrayNotDeclared; var_name)),
        }
    }

    /// Declares an array, replacing any earlier array of the same name.
    pub fn dimension_array(&mut self, var_name: &str, dimension: usize) -> Result<()> {
        if dimension < 1 {
            return Err(error!(ArraySyntax; "DIMENSION MUST BE AT LEAST 1"));
        }
        self.arrays.insert(
            var_name.to_string(),
            Array {
                dimension,
                cells: BTreeMap::new(),
            },
        );
        Ok(())
    }

    pub fn store_array(&mut self, var_name: &str, arr: &[Val], value: Val) -> Result<()> {
        let key = self.build_array_key(var_name, arr)?;
        match self.arrays.get_mut(var_name) {
            Some(array) => {
                array.cells.insert(key, value);
                Ok(())
            }
            None => Err(error!(ArrayNotDeclared; var_name)),
        }
    }

    pub fn fetch_array(&self, var_name: &str, arr: &[Val]) -> Result<Val> {
        let key = self.build_array_key(var_name, arr)?;
        match self.array(var_name)?.cells.get(&key) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(VariableNotDeclared; format!("{}[{}]", var_name, key))),
        }
    }

    fn build_array_key(&self, var_name: &str, arr: &[Val]) -> Result<String> {
        let dimension = self.array(var_name)?.dimension;
        if arr.len() > dimension {
            return Err(error!(ArrayArity; "TOO MANY INDICES"));
        }
        if arr.len() < dimension {
            return Err(error!(ArrayArity; "TOO FEW INDICES"));
        }
        let keys: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
        Ok(keys.join(","))
    }

    pub fn vars(&self) -> BTreeMap<&str, &Val> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    pub fn arrays(&self) -> BTreeMap<&str, &Array> {
        self.arrays.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_overwrites_in_place() {
        let mut v = Var::new();
        v.store("A", Val::Number(1.0)).unwrap();
        v.store("A", Val::Text("x".into())).unwrap();
        assert_eq!(v.fetch("A").unwrap(), Val::Text("x".into()));
        assert_eq!(v.vars().len(), 1);
    }

    #[test]
    fn test_array_key_is_comma_joined() {
        let mut v = Var::new();
        v.dimension_array("M", 2).unwrap();
        v.store_array("M", &[Val::Number(1.0), Val::Number(2.0)], Val::Number(9.0))
            .unwrap();
        let m = v.array("M").unwrap();
        assert_eq!(m.dimension(), 2);
        assert_eq!(m.cells().get("1,2"), Some(&Val::Number(9.0)));
    }

    #[test]
    fn test_arity() {
        let mut v = Var::new();
        v.dimension_array("A", 1).unwrap();
        let too_many = v
            .fetch_array("A", &[Val::Number(1.0), Val::Number(2.0)])
            .unwrap_err();
        assert_eq!(too_many.to_string(), "ARRAY ARITY ERROR; TOO MANY INDICES");
        let too_few = v.store_array("A", &[], Val::Number(1.0)).unwrap_err();
        assert_eq!(too_few.to_string(), "ARRAY ARITY ERROR; TOO FEW INDICES");
    }

    #[test]
    fn test_undeclared() {
        let v = Var::new();
        assert_eq!(
            v.fetch("X").unwrap_err().to_string(),
            "VARIABLE NOT DECLARED; X"
        );
        assert_eq!(
            v.fetch_array("Y", &[]).unwrap_err().to_string(),
            "ARRAY NOT DECLARED; Y"
        );
    }
}
