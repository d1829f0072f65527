//! Integration test for self-referential and mutually referential domain types

use facet_metamodel::{
    ClassDescriptor, ClassRepository, IntrospectionState, MetaModelConfig, MethodDescriptor,
    SpecificationLoader,
};
use std::sync::Arc;
use std::thread;

fn graph() -> ClassRepository {
    let mut repository = ClassRepository::new();
    repository.register(
        ClassDescriptor::new("com.acme.Employee")
            .with_method(MethodDescriptor::new("getManager").returning("com.acme.Employee"))
            .with_method(MethodDescriptor::new("getDepartment").returning("com.acme.Department"))
            .with_method(
                MethodDescriptor::new("getReports").returning("java.util.Set<com.acme.Employee>"),
            ),
    );
    repository.register(
        ClassDescriptor::new("com.acme.Department")
            .with_method(MethodDescriptor::new("getHead").returning("com.acme.Employee"))
            .with_method(
                MethodDescriptor::new("getStaff").returning("java.util.List<com.acme.Employee>"),
            )
            .with_method(
                MethodDescriptor::new("transfer")
                    .returning("com.acme.Department")
                    .with_param("com.acme.Employee"),
            ),
    );
    repository
}

#[test]
fn test_self_reference_terminates() {
    let loader = SpecificationLoader::new(graph(), MetaModelConfig::new());
    let employee = loader.load_specification("com.acme.Employee").unwrap();

    assert_eq!(employee.state(), IntrospectionState::FullyIntrospected);
    assert!(employee.property("manager").is_some());
    assert!(employee.collection("reports").is_some());
}

#[test]
fn test_every_reachable_spec_is_fully_introspected() {
    let loader = SpecificationLoader::new(graph(), MetaModelConfig::new());
    loader.init().unwrap();

    for class in ["com.acme.Employee", "com.acme.Department"] {
        let spec = loader.lookup_by_class(class).unwrap();
        assert_eq!(spec.state(), IntrospectionState::FullyIntrospected, "{class}");
    }
    let department = loader.lookup_by_class("com.acme.Department").unwrap();
    assert!(department.collection("staff").is_some());
    assert!(department.action("transfer").is_some());
}

#[test]
fn test_repeated_loads_return_the_same_spec() {
    let loader = SpecificationLoader::new(graph(), MetaModelConfig::new());
    let first = loader.load_specification("com.acme.Department").unwrap();
    let second = loader.load_specification("com.acme.Department").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.all_specifications().len(), loader.cache().len());
}

#[test]
fn test_concurrent_loads_settle_on_one_spec() {
    let loader = SpecificationLoader::new(graph(), MetaModelConfig::new());

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let spec = loader.load_specification("com.acme.Employee");
                assert!(spec.is_some());
            });
        }
    });

    let employee = loader.lookup_by_class("com.acme.Employee").unwrap();
    assert_eq!(employee.state(), IntrospectionState::FullyIntrospected);
    let again = loader.load_specification("com.acme.Employee").unwrap();
    assert!(Arc::ptr_eq(&employee, &again));
}
