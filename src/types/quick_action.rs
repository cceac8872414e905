use crate::types::AgentType;

/// A canned query bound to an agent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuickAction {
    /// Short name shown in the list.
    pub label: &'static str,
    /// Text sent as the user message.
    pub query: &'static str,
    /// Agent selected before sending.
    pub agent: AgentType,
}

/// The quick actions offered by the chat client, numbered from 1 in the UI.
pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "Revenue Analytics",
        query: "Show me revenue performance by salesperson with charts",
        agent: AgentType::Analytics,
    },
    QuickAction {
        label: "Team Performance",
        query: "Show me team performance overview",
        agent: AgentType::Sales,
    },
    QuickAction {
        label: "Lead Analytics",
        query: "Show me lead qualification metrics",
        agent: AgentType::LeadQualification,
    },
    QuickAction {
        label: "System Help",
        query: "Help me understand the system features",
        agent: AgentType::Support,
    },
];

/// Looks up a quick action by its 1-based number.
pub fn quick_action(number: usize) -> Option<&'static QuickAction> {
    number.checked_sub(1).and_then(|index| QUICK_ACTIONS.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_lookup() {
        assert_eq!(quick_action(0), None);
        assert_eq!(quick_action(1).unwrap().agent, AgentType::Analytics);
        assert_eq!(quick_action(4).unwrap().label, "System Help");
        assert_eq!(quick_action(5), None);
    }
}
