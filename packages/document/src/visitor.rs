use crate::{ComponentInstance, PageDocument};

/// Visitor for traversing a page's component tree immutably
///
/// The default implementations walk the entire tree depth-first in array
/// order. Override `visit_instance` to act on nodes; call [`walk_instance`]
/// from the override to keep descending.
pub trait Visitor: Sized {
    fn visit_page(&mut self, page: &PageDocument) {
        walk_page(self, page);
    }

    fn visit_instance(&mut self, instance: &ComponentInstance, depth: usize) {
        walk_instance(self, instance, depth);
    }
}

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &PageDocument) {
    for instance in &page.components {
        visitor.visit_instance(instance, 0);
    }
}

pub fn walk_instance<V: Visitor>(visitor: &mut V, instance: &ComponentInstance, depth: usize) {
    for child in instance.children() {
        visitor.visit_instance(child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_page, PageDraft, SequentialIds};

    struct DepthCollector {
        seen: Vec<(String, usize)>,
    }

    impl Visitor for DepthCollector {
        fn visit_instance(&mut self, instance: &ComponentInstance, depth: usize) {
            self.seen.push((instance.id.clone(), depth));
            walk_instance(self, instance, depth);
        }
    }

    #[test]
    fn test_visitor_reports_depth() {
        let mut ids = SequentialIds::new("p");
        let page = create_page(
            &mut ids,
            PageDraft {
                components: Some(vec![
                    ComponentInstance::new("a", "Section")
                        .with_children(vec![ComponentInstance::new("b", "Title")]),
                    ComponentInstance::new("c", "Spacer").with_order(1),
                ]),
                ..PageDraft::default()
            },
        );

        let mut collector = DepthCollector { seen: Vec::new() };
        collector.visit_page(&page);

        assert_eq!(
            collector.seen,
            vec![
                ("a".to_string(), 0),
                ("b".to_string(), 1),
                ("c".to_string(), 0)
            ]
        );
    }
}
