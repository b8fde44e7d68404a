use crate::models::device::DeviceTable;
use crate::models::preference::PreferenceTable;
use crate::models::room::RoomTable;
use crate::models::sensor::SensorTable;
use crate::models::threshold::ThresholdTable;
use crate::models::Table;

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(mut tables: Vec<Box<dyn Table>>) -> Self {
        Self::sort_tables(&mut tables);
        Self { tables }
    }

    /// Order tables so every table comes after the ones it references.
    fn sort_tables(tables: &mut Vec<Box<dyn Table>>) {
        let mut remaining = std::mem::take(tables);
        let mut sorted: Vec<Box<dyn Table>> = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let ready: Vec<usize> = remaining
                .iter()
                .enumerate()
                .filter(|(_, table)| {
                    table
                        .dependencies()
                        .iter()
                        .all(|dep| sorted.iter().any(|done| done.name() == *dep))
                })
                .map(|(index, _)| index)
                .collect();

            assert!(!ready.is_empty(), "Circular dependency detected or unresolved dependencies exist.");

            for index in ready.into_iter().rev() {
                sorted.push(remaining.swap_remove(index));
            }
        }

        *tables = sorted;
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(RoomTable),
            Box::new(DeviceTable),
            Box::new(SensorTable),
            Box::new(ThresholdTable),
            Box::new(PreferenceTable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct MockRoomTable;
    impl Table for MockRoomTable {
        fn name(&self) -> &'static str {
            "rooms"
        }
        fn create(&self) -> String {
            "CREATE TABLE rooms;".to_string()
        }
        fn dispose(&self) -> String {
            "DROP TABLE rooms;".to_string()
        }
        fn dependencies(&self) -> Vec<&'static str> {
            vec![]
        }
    }

    #[derive(Clone)]
    struct MockDeviceTable;
    impl Table for MockDeviceTable {
        fn name(&self) -> &'static str {
            "devices"
        }
        fn create(&self) -> String {
            "CREATE TABLE devices;".to_string()
        }
        fn dispose(&self) -> String {
            "DROP TABLE devices;".to_string()
        }
        fn dependencies(&self) -> Vec<&'static str> {
            vec!["rooms"]
        }
    }

    #[test]
    fn test_create_schema_resolves_dependencies() {
        let manager = SchemaManager::new(vec![Box::new(MockDeviceTable), Box::new(MockRoomTable)]);

        let statements = manager.create_schema();

        assert_eq!(statements, vec!["CREATE TABLE rooms;", "CREATE TABLE devices;"]);
    }

    #[test]
    fn test_dispose_schema_reverses_order() {
        let manager = SchemaManager::new(vec![Box::new(MockDeviceTable), Box::new(MockRoomTable)]);

        let statements = manager.dispose_schema();

        assert_eq!(statements, vec!["DROP TABLE devices;", "DROP TABLE rooms;"]);
    }
}
