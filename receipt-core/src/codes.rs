//! Code tables mapping source enumerations to target identifiers.
//!
//! Tables are `static` slices: they are built into the binary and offer no
//! way to add, remove or override an entry at runtime.

use std::borrow::Borrow;
use std::fmt;

/// Identifier returned for any code outside a table's domain.
pub const UNKNOWN: &str = "unknown";

/// Marking scheme assigned when no known scheme key is present.
pub const OTHER_MARKING: &str = "other";

/// A finite mapping from a source code to a target identifier.
#[derive(Debug)]
pub struct CodeTable<K: 'static> {
    name: &'static str,
    entries: &'static [(K, &'static str)],
    fallback: &'static str,
}

impl<K: 'static> CodeTable<K> {
    pub const fn new(
        name: &'static str,
        entries: &'static [(K, &'static str)],
        fallback: &'static str,
    ) -> Self {
        Self {
            name,
            entries,
            fallback,
        }
    }

    pub(crate) fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = &(K, &'static str)> {
        self.entries.iter()
    }

    /// Resolve `code`, falling back when it is absent or unmapped.
    pub fn lookup<Q>(&self, code: Option<&Q>) -> &'static str
    where
        K: Borrow<Q>,
        Q: PartialEq + fmt::Debug + ?Sized,
    {
        let Some(code) = code else {
            return self.fallback;
        };
        match self.entries.iter().find(|(key, _)| key.borrow() == code) {
            Some((_, target)) => *target,
            None => {
                tracing::debug!(table = self.name, code = ?code, "Unmapped code");
                self.fallback
            }
        }
    }
}

/// Measurement units (FFD tag 2108). Targets are localized labels.
pub static MEASUREMENT_UNITS: CodeTable<i64> = CodeTable::new(
    "measurement_unit",
    &[
        (0, "шт"),
        (10, "Грамм"),
        (11, "Килограмм"),
        (12, "Тонна"),
        (20, "Сантиметр"),
        (21, "Дециметр"),
        (22, "Метр"),
        (30, "Квадратный сантиметр"),
        (31, "Квадратный дециметр"),
        (32, "Квадратный метр"),
        (40, "Миллилитр"),
        (41, "Литр"),
        (42, "Кубический метр"),
        (50, "Киловатт час"),
        (51, "Гигакалория"),
        (70, "Сутки (день)"),
        (71, "Час"),
        (72, "Минута"),
        (73, "Секунда"),
        (80, "Килобайт"),
        (81, "Мегабайт"),
        (82, "Гигабайт"),
        (83, "Терабайт"),
        (255, "иное"),
    ],
    UNKNOWN,
);

/// Payment subject (FFD tag 1212).
pub static PAYMENT_OBJECTS: CodeTable<i64> = CodeTable::new(
    "payment_object",
    &[
        (1, "commodity"),
        (2, "excise"),
        (3, "job"),
        (4, "service"),
        (5, "gamblingBet"),
        (6, "gamblingPrize"),
        (7, "lottery"),
        (8, "lotteryPrize"),
        (9, "intellectualActivity"),
        (10, "payment"),
        (11, "agentCommission"),
        (12, "pay"),
        (13, "another"),
        (14, "proprietaryLaw"),
        (15, "nonOperatingIncome"),
        (16, "otherContributions"),
        (17, "merchantTax"),
        (18, "resortFee"),
        (19, "deposit"),
        (20, "consumption"),
        (21, "soleProprietorCPIContributions"),
        (22, "cpiContributions"),
        (23, "soleProprietorCMIContributions"),
        (24, "cmiContributions"),
        (25, "csiContributions"),
        (26, "casinoPayment"),
        (27, "bankAgentPayment"),
        (30, "markedExciseNoCode"),
        (31, "markedExciseWithCode"),
        (32, "markedCommodityNoCode"),
        (33, "markedCommodityWithCode"),
    ],
    UNKNOWN,
);

/// Payment method (FFD tag 1214).
pub static PAYMENT_METHODS: CodeTable<&'static str> = CodeTable::new(
    "payment_method",
    &[
        ("full_prepayment", "fullPrepayment"),
        ("prepayment", "prepayment"),
        ("advance", "advance"),
        ("full_payment", "fullPayment"),
        ("partial_payment", "partialPayment"),
        ("credit", "credit"),
        ("credit_payment", "creditPayment"),
    ],
    UNKNOWN,
);

/// Marking schemes in classification priority order.
pub static MARKING_SCHEMES: CodeTable<&'static str> = CodeTable::new(
    "marking_scheme",
    &[("egais20", "egais20"), ("egais30", "egais30")],
    OTHER_MARKING,
);

pub fn measurement_unit(code: Option<i64>) -> &'static str {
    MEASUREMENT_UNITS.lookup(code.as_ref())
}

pub fn payment_object(code: Option<i64>) -> &'static str {
    PAYMENT_OBJECTS.lookup(code.as_ref())
}

pub fn payment_method(code: Option<&str>) -> &'static str {
    PAYMENT_METHODS.lookup(code)
}

/// Pick the first scheme, in priority order, for which `has_key` holds.
pub fn marking_scheme<F>(has_key: F) -> &'static str
where
    F: Fn(&str) -> bool,
{
    MARKING_SCHEMES
        .entries()
        .find(|(key, _)| has_key(key))
        .map(|(_, scheme)| *scheme)
        .unwrap_or(MARKING_SCHEMES.fallback())
}
