/*!

This is the long-form manual for `onoe_costs` and the `onoe generate` and `onoe dashboard` commands.

## The two datasets

The crate carries two cost tables that are kept apart:

* the **national line-item table** (16 rows), a hand-authored estimate of every budget head of a
  general election, used by the dashboard;
* the **per-state projection**, computed from the seat counts of 30 states and union territories and
  a small set of unit costs, used by the generator.

The figures of one are not derived from the other and do not add up to each other.

## National line-item table

All costs are in crores (ten million INR). For every row, the normal-cycle cost is:

| Category                 | Normal-cycle cost                 |
|--------------------------|-----------------------------------|
| `Capital`, `Lifecycle`   | Lok Sabha cost only               |
| everything else          | Lok Sabha cost + state cost       |

Machines and their disposal are bought once and serve both staggered polls. Running costs are paid
for each poll.

The difference is the ONOE cost minus the normal-cycle cost. A negative difference is a saving.

Rows are also grouped in two types for the structural-shift charts:
`Capital (Assets)` (`Capital`, `Infrastructure`, `Logistics`) and `Operational (Running)`
(all the others).

### Input format

The dashboard accepts an alternate table with `--input`, either as CSV (default) or as an Excel
workbook (`--input-type xlsx`). The header must be:

```text
Task_ID,Task_Name,Category,Sub_Unit_Details,Unit_Cost_INR,Quantity_LS_Only,Cost_LS_Only_Cr,Quantity_State_Only,Cost_State_Only_Cr,Quantity_ONOE,Cost_ONOE_Cr,Impact_Note
```

`Unit_Cost_INR` may be `NA` or empty for lump-sum heads.

## Per-state projection

For a state with `ls` Lok Sabha seats, `as` assembly seats and a security tier:

* booths = `as` x 250
* staff = booths x 6
* companies = `ls` x 15 x tier multiplier (1.0 normal, 1.5 sensitive, 2.5 conflict)

| Line item           | Standard cycle                          | ONOE                                 |
|---------------------|-----------------------------------------|--------------------------------------|
| EVM Procurement     | booths x 1.2 x EVM set                  | booths x 2.4 x EVM set               |
| Polling Staff Wages | staff x wage x 2                        | staff x wage x 1.2                   |
| CAPF Logistics      | companies x company cost x 2            | companies x company cost             |
| Last Mile Transport | booths x 0.8 x vehicle x 2              | booths x 0.8 x vehicle x 1.1         |

Results are converted to crores and rounded to two decimals.

## Configuration

`onoe generate --config assumptions.json` overrides the built-in constants. Every field is optional:

```json
{
  "unitCosts": {
    "evmSet": 45000,
    "vvpatSlipStorage": 5000,
    "pollingStaffWage": 18000,
    "securityCompanyCr": 2.5,
    "transportVehicle": 6000,
    "webcastingCam": 1500,
    "indelibleInk": 180
  },
  "assumptions": {
    "boothsPerAssemblySeat": 250,
    "staffPerBooth": 6,
    "vehiclesPerBooth": 0.8,
    "securityCompanySize": 100,
    "companiesPerLokSabhaSeat": 15
  },
  "states": [
    { "name": "Goa", "lokSabhaSeats": 2, "assemblySeats": 40, "securityTier": 1 }
  ],
  "replaceStates": false
}
```

Listed states replace the built-in entry of the same name, or are appended. With
`"replaceStates": true` only the listed states are projected.

 */
