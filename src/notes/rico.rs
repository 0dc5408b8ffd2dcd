//! Rico (Grupo XP) note layout
//!
//! ```text
//! Nr. nota Folha Data pregão
//! 4567890 1 27/03/2024
//! Negócios realizados
//! Q Negociação C/V Tipo mercado Prazo Especificação do título Obs. (*) Quantidade Preço / Ajuste Valor Operação / Ajuste D/C
//! 1-BOVESPA C FRACIONARIO PETROBRAS PN # 10 35,00 350,00 D
//! Resumo dos Negócios Resumo Financeiro
//! ```

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::fields::{
    self, amount_rule, date_rule, label_rule, note_id_rule, WITHHOLDING_LABEL,
};
use super::segmenter::{self, TableMarkers};
use super::NoteLayout;
use crate::error::Result;
use crate::models::{Broker, TaxTotals};

/// `Data pregão\n4567890 1 27/03/2024` -> `27/03/2024`
static AUCTION_DATE: Lazy<Regex> = Lazy::new(|| date_rule("Data pregão"));

/// `Nr. nota Folha Data pregão\n4567890 1 27/03/2024` -> `4567890`
static NOTE_ID: Lazy<Regex> = Lazy::new(|| note_id_rule(r"Nr\. nota"));

const TABLE: TableMarkers = TableMarkers {
    start: "Negócios realizados",
    end: "Resumo dos Negócios",
    header_lines: 1,
};

/// `Compras à vista 350,00 Taxa de liquidação 1,73 D` -> `1,73`
static FEES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "Taxa de liquidação",
        "Taxa de Registro",
        "Taxa de termo/opções",
        r"Taxa A\.N\.A\.?",
        "Emolumentos",
        "Taxa Operacional",
        "Execução",
        "Taxa de Custódia",
        "Impostos",
        "Outros",
    ]
    .into_iter()
    .map(amount_rule)
    .collect()
});

/// `I.R.R.F. s/ operações, base R$ 6.500,00 0,32` -> `0,32`
static WITHHOLDING: Lazy<Regex> = Lazy::new(|| label_rule(WITHHOLDING_LABEL));

pub struct RicoLayout;

impl NoteLayout for RicoLayout {
    fn broker(&self) -> Broker {
        Broker::Rico
    }

    fn auction_date(&self, text: &str) -> Result<NaiveDate> {
        fields::auction_date(text, &AUCTION_DATE)
    }

    fn note_id(&self, text: &str) -> Option<String> {
        fields::note_id(text, &NOTE_ID)
    }

    fn trade_lines<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        segmenter::table_lines(text, &TABLE)
    }

    fn tax_totals(&self, text: &str) -> TaxTotals {
        TaxTotals {
            total_fee: fields::total_fee(text, &FEES),
            total_ir: fields::total_withholding(text, &WITHHOLDING),
        }
    }
}
