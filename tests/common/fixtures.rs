use page_equivalence::element::element_model::{ElementDescriptor, TagCategory};
use page_equivalence::element::markers::FeatureCatalog;
use page_equivalence::graph::graph_model::{CrawlGraph, Edge, PageRecord};
use page_equivalence::hasher::state_vector::compute_state_vector;

/// A visible, enabled element of the given tag category.
pub fn element(tag: TagCategory) -> ElementDescriptor {
    ElementDescriptor {
        tag,
        visible: true,
        enabled: true,
        ..Default::default()
    }
}

/// A clickable button with text.
pub fn button() -> ElementDescriptor {
    ElementDescriptor {
        clickable: true,
        has_text: true,
        ..element(TagCategory::Button)
    }
}

/// A navigation link.
pub fn link() -> ElementDescriptor {
    ElementDescriptor {
        clickable: true,
        is_link: true,
        has_text: true,
        ..element(TagCategory::Link)
    }
}

/// A text input field.
pub fn input() -> ElementDescriptor {
    ElementDescriptor {
        focusable: true,
        editable: true,
        is_form_field: true,
        ..element(TagCategory::Input)
    }
}

/// Attach a functional data-marker to an element.
pub fn with_marker(mut el: ElementDescriptor, marker: &str) -> ElementDescriptor {
    el.data_markers.insert(marker.to_string(), "1".to_string());
    el
}

/// A page record with no state vector attached.
pub fn page(id: &str, url: &str, elements: Vec<ElementDescriptor>) -> PageRecord {
    PageRecord {
        id: id.to_string(),
        url: url.to_string(),
        title: format!("Page {}", id),
        timestamp: 1_700_000_000_000,
        elements,
        state_vector: None,
        screenshots: None,
    }
}

/// A page with its state vector precomputed from its elements.
pub fn hashed_page(id: &str, url: &str, elements: Vec<ElementDescriptor>) -> PageRecord {
    let mut p = page(id, url, elements);
    p.state_vector = Some(compute_state_vector(&p.elements, &FeatureCatalog::default()));
    p
}

/// A product-detail page: three buttons, one image, an add-to-cart marker.
pub fn product_page(id: &str, url: &str) -> PageRecord {
    let mut elements = vec![button(), button(), with_marker(button(), "cart")];
    elements.push(ElementDescriptor {
        has_image: true,
        ..element(TagCategory::Media)
    });
    page(id, url, elements)
}

/// A navigation/search page, deliberately far from `product_page` in every
/// feature group: forms, links, labeled fields, no buttons or images.
pub fn nav_page(id: &str, url: &str) -> PageRecord {
    let search = with_marker(link(), "search");

    let mut field = input();
    field.checked = true;
    field.has_label = true;

    let mut login_form = with_marker(element(TagCategory::Form), "login");
    login_form.has_description = true;
    login_form.expanded = true;

    page(id, url, vec![search, field, input(), link(), login_form])
}

pub fn edge(from: &str, to: &str) -> Edge {
    Edge {
        from: from.to_string(),
        to: to.to_string(),
        kind: "link".to_string(),
        weight: 1.0,
    }
}

/// A 5-node graph: n1 -> n2 -> n3 -> n4 in a chain, n5 fully isolated.
pub fn chain_with_isolated() -> CrawlGraph {
    CrawlGraph {
        nodes: vec![
            page("n1", "https://example.com/a", vec![button()]),
            page("n2", "https://example.com/b", vec![link()]),
            page("n3", "https://example.com/c", vec![input()]),
            page("n4", "https://example.com/d", vec![button()]),
            page("n5", "https://example.com/e", vec![button()]),
        ],
        edges: vec![edge("n1", "n2"), edge("n2", "n3"), edge("n3", "n4")],
    }
}

/// Pages whose vectors differ only in button/interactive counts, for
/// exercising the count tolerance band. `n` buttons per page.
pub fn buttons_page(id: &str, n: usize) -> PageRecord {
    hashed_page(
        id,
        &format!("https://example.com/{}", id),
        (0..n).map(|_| button()).collect(),
    )
}
