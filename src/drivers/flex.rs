// FlexSonic — Flex Sensor Array Driver
//
// Five bend sensors as voltage dividers on ADC1, read one-shot via raw
// ESP-IDF calls. 11 dB attenuation for the full 0–3.3 V swing, 12-bit width.

use anyhow::{bail, ensure, Result};

use crate::engine::FlexSensors;

pub struct FlexArray {
    handle: esp_idf_sys::adc_oneshot_unit_handle_t,
    channels: Vec<esp_idf_sys::adc_channel_t>,
}

impl FlexArray {
    /// Bring up ADC1 and configure one oneshot channel per sensor, in glove
    /// order (thumb → pinky).
    pub fn new(channels: &[u32]) -> Result<Self> {
        unsafe {
            let mut handle: esp_idf_sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
            let unit_cfg = esp_idf_sys::adc_oneshot_unit_init_cfg_t {
                unit_id: esp_idf_sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: esp_idf_sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            let ret = esp_idf_sys::adc_oneshot_new_unit(&unit_cfg, &mut handle);
            if ret != esp_idf_sys::ESP_OK {
                bail!("ADC unit init failed ({})", ret);
            }

            let chan_cfg = esp_idf_sys::adc_oneshot_chan_cfg_t {
                atten: esp_idf_sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: esp_idf_sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            let mut configured = Vec::with_capacity(channels.len());
            for &channel in channels {
                let channel = channel as esp_idf_sys::adc_channel_t;
                let ret = esp_idf_sys::adc_oneshot_config_channel(handle, channel, &chan_cfg);
                if ret != esp_idf_sys::ESP_OK {
                    bail!("ADC channel {} config failed ({})", channel, ret);
                }
                configured.push(channel);
            }

            log::info!("flex array ready on {} ADC1 channels", configured.len());
            Ok(Self { handle, channels: configured })
        }
    }
}

impl FlexSensors for FlexArray {
    fn read_channel(&mut self, channel: usize) -> Result<i32> {
        ensure!(channel < self.channels.len(), "no flex channel {}", channel);
        let mut raw: i32 = 0;
        let ret =
            unsafe { esp_idf_sys::adc_oneshot_read(self.handle, self.channels[channel], &mut raw) };
        if ret != esp_idf_sys::ESP_OK {
            bail!("ADC read failed on channel {} ({})", channel, ret);
        }
        Ok(raw)
    }
}
