//! Built-in catalog, used whenever the remote store is unconfigured, unreachable or empty

use super::{AddOn, Catalog, Plan, PortfolioEntry};

pub fn builtin_catalog() -> Catalog {
    Catalog {
        plans: builtin_plans(),
        add_ons: builtin_add_ons(),
        demos: builtin_demos(),
    }
}

pub fn builtin_plans() -> Vec<Plan> {
    vec![
        plan(
            "starter",
            "Starter",
            6999,
            "Everything a new boutique needs to start selling online.",
            &["Shopify Setup", "COD + UPI", "35 Products"],
        ),
        Plan {
            recommended: true,
            ..plan(
                "advanced",
                "Advanced",
                8499,
                "For growing labels ready to rank and stand out.",
                &["Unlimited Products", "SEO", "Custom Sections"],
            )
        },
        plan(
            "premium",
            "Premium",
            9999,
            "Automation and hand-holding for established brands.",
            &["AI Chatbot", "3 Months Support"],
        ),
        Plan {
            is_custom: true,
            ..plan(
                "custom",
                "Custom",
                0,
                "Multi-store, integrations or something unusual? Let's talk.",
                &["Custom Integrations", "Dedicated Developer"],
            )
        },
    ]
}

pub fn builtin_add_ons() -> Vec<AddOn> {
    vec![AddOn {
        id: "extra-products".to_string(),
        name: "Extra 50 Products".to_string(),
        description: "We upload and format 50 more products for you.".to_string(),
        price: 1499,
        allowed_for: Some(["starter".to_string()].into_iter().collect()),
    }]
}

pub fn builtin_demos() -> Vec<PortfolioEntry> {
    vec![
        demo(
            "rang-boutique",
            "Rang Boutique",
            "Ethnic Wear",
            "Festive kurtas and lehengas with COD and UPI checkout.",
        ),
        demo(
            "kurti-kraft",
            "Kurti Kraft",
            "Everyday Kurtis",
            "A 35-product starter store that went live in a week.",
        ),
        demo(
            "banarasi-threads",
            "Banarasi Threads",
            "Sarees",
            "Handloom sarees with SEO-tuned collection pages.",
        ),
    ]
}

fn plan(id: &str, name: &str, price: u32, description: &str, features: &[&str]) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        recommended: false,
        is_custom: false,
    }
}

fn demo(id: &str, name: &str, category: &str, description: &str) -> PortfolioEntry {
    PortfolioEntry {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        url: None,
        image: None,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plans() {
        let catalog = builtin_catalog();
        let prices: Vec<u32> = catalog.plans.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![6999, 8499, 9999, 0]);

        let custom: Vec<&str> = catalog
            .plans
            .iter()
            .filter(|p| p.is_custom)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(custom, vec!["custom"]);
        assert_eq!(catalog.plans.iter().filter(|p| p.recommended).count(), 1);
    }

    #[test]
    fn test_builtin_add_on_is_starter_only() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.add_ons.len(), 1);
        assert!(catalog.add_ons[0].is_allowed_for("starter"));
        assert!(!catalog.add_ons[0].is_allowed_for("advanced"));
    }

    #[test]
    fn test_builtin_demos() {
        assert_eq!(builtin_demos().len(), 3);
    }
}
