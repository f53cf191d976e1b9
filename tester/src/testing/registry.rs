//! Static checks over the service registry

use std::collections::BTreeMap;

use orchestrator::ServiceRegistry;

use super::AssertionResult;

/// Every readiness URL listens on its own port
pub fn check_port_uniqueness(registry: &ServiceRegistry) -> AssertionResult {
    const NAME: &str = "Port uniqueness";

    let mut owners: BTreeMap<u16, Vec<&str>> = BTreeMap::new();
    let mut missing = Vec::new();
    for spec in registry.iter() {
        match spec.port() {
            Some(port) => owners.entry(port).or_default().push(&spec.name),
            None => missing.push(spec.name.as_str()),
        }
    }

    if !missing.is_empty() {
        return AssertionResult::failure(NAME, format!("No port for: {}", missing.join(", ")));
    }

    let ports: Vec<String> = registry
        .iter()
        .filter_map(|s| s.port())
        .map(|p| p.to_string())
        .collect();
    let clashes: Vec<String> = owners
        .iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(port, names)| format!("{port} ({})", names.join(", ")))
        .collect();

    if clashes.is_empty() {
        AssertionResult::success(NAME, format!("Ports: [{}]", ports.join(", ")))
    } else {
        AssertionResult::failure(NAME, format!("Shared ports: {}", clashes.join("; ")))
    }
}

/// Every service's working directory exists
pub fn check_service_layout(registry: &ServiceRegistry) -> AssertionResult {
    const NAME: &str = "Service independence (structure)";

    let missing: Vec<String> = registry
        .iter()
        .filter(|spec| !spec.working_dir.is_dir())
        .map(|spec| format!("{} ({})", spec.name, spec.working_dir.display()))
        .collect();

    if missing.is_empty() {
        AssertionResult::success(NAME, "All service directories exist")
    } else {
        AssertionResult::failure(NAME, format!("Missing: {}", missing.join(", ")))
    }
}
