use serde::{Deserialize, Serialize};

use crate::config::TipConfig;

/// Href of the custom entry; clients substitute `{amount}` with the user input.
pub const CUSTOM_AMOUNT_HREF: &str = "/api/tip?amount={amount}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParameter {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipOption {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<TipOption>,
}

/// Blink payload returned to wallets and non-HTML clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub title: String,
    pub icon: String,
    pub description: String,
    pub links: ActionLinks,
    pub is_starknet: bool,
}

impl TipOption {
    fn preset(label: String, amount: &str) -> Self {
        TipOption {
            label,
            href: tip_href(amount),
            parameters: Vec::new(),
        }
    }
}

impl ActionDescriptor {
    /// Preset amounts in configured order, followed by the custom amount entry.
    pub fn tip_menu(conf: &TipConfig) -> Self {
        let symbol = &conf.token_symbol;
        let mut actions: Vec<TipOption> = conf
            .preset_amounts
            .iter()
            .map(|amount| TipOption::preset(format!("{} {}", amount, symbol), amount))
            .collect();
        actions.push(TipOption {
            label: "Custom Amount".to_string(),
            href: CUSTOM_AMOUNT_HREF.to_string(),
            parameters: vec![ActionParameter {
                name: "amount".to_string(),
                label: format!("Enter a custom {} amount", symbol),
            }],
        });

        ActionDescriptor {
            title: "Buy Me a Coffee".to_string(),
            icon: conf.image_url(),
            description: format!(
                "Support me by buying me a coffee using {}. Choose an amount or enter a custom amount.",
                symbol
            ),
            links: ActionLinks { actions },
            is_starknet: true,
        }
    }

    /// Single action for `amount`. The amount is not validated here.
    pub fn single_tip(conf: &TipConfig, amount: &str) -> Self {
        let symbol = &conf.token_symbol;
        ActionDescriptor {
            title: format!("Tip {} {}", amount, symbol),
            icon: conf.image_url(),
            description: format!("Tip {} {} to support.", amount, symbol),
            links: ActionLinks {
                actions: vec![TipOption::preset("Buy Me a Coffee".to_string(), amount)],
            },
            is_starknet: true,
        }
    }
}

/// `/api/tip?amount=<amount>` with the amount form-encoded.
pub fn tip_href(amount: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(amount.as_bytes()).collect();
    format!("/api/tip?amount={}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_menu_order() {
        let menu = ActionDescriptor::tip_menu(&TipConfig::default());
        let actions = &menu.links.actions;
        assert_eq!(actions.len(), 4);
        for (action, amount) in actions.iter().zip(["10", "50", "100"]) {
            assert_eq!(action.label, format!("{} STRK", amount));
            assert_eq!(action.href, format!("/api/tip?amount={}", amount));
            assert!(action.parameters.is_empty());
        }
        assert_eq!(actions[3].href, "/api/tip?amount={amount}");
        assert_eq!(actions[3].parameters[0].name, "amount");
        assert!(menu.is_starknet);
    }

    #[test]
    fn test_wire_format() {
        let value = serde_json::to_value(ActionDescriptor::tip_menu(&TipConfig::default())).unwrap();
        assert_eq!(value["isStarknet"], true);
        assert_eq!(value["title"], "Buy Me a Coffee");
        assert!(value["links"]["actions"][0].get("parameters").is_none());
        assert_eq!(
            value["links"]["actions"][3]["parameters"][0]["label"],
            "Enter a custom STRK amount"
        );
    }

    #[test]
    fn test_single_tip() {
        let tip = ActionDescriptor::single_tip(&TipConfig::default(), "50");
        assert_eq!(tip.title, "Tip 50 STRK");
        assert_eq!(tip.description, "Tip 50 STRK to support.");
        assert_eq!(tip.links.actions.len(), 1);
        assert_eq!(tip.links.actions[0].label, "Buy Me a Coffee");
        assert_eq!(tip.links.actions[0].href, "/api/tip?amount=50");
    }

    #[test]
    fn test_tip_href_encodes_amount() {
        assert_eq!(tip_href("1.5"), "/api/tip?amount=1.5");
        assert_eq!(tip_href("1&x=2"), "/api/tip?amount=1%26x%3D2");
    }
}
